use crc32fast::hash;

/// Issues ids for sections and fields created during one builder session.
///
/// Ids look like `"3b1c9e0a-7"`: the CRC32 of the session id in hex, then a
/// counter. Two sessions with different ids never collide, and a session
/// never hands out the same id twice, even after undo.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    issued: u32,
}

impl IdGenerator {
    pub fn new(session_id: &str) -> Self {
        Self {
            prefix: format!("{:08x}", hash(session_id.as_bytes())),
            issued: 0,
        }
    }

    pub fn new_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{}", self.prefix, self.issued)
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_session() {
        let mut ids = IdGenerator::new("builder-1");
        let first = ids.new_id();
        let second = ids.new_id();

        assert!(first.ends_with("-1"));
        assert!(second.ends_with("-2"));
        assert_eq!(first.split('-').next(), second.split('-').next());
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_same_session_id_gives_same_ids() {
        let mut a = IdGenerator::new("form-builder/3");
        let mut b = IdGenerator::new("form-builder/3");
        assert_eq!(a.new_id(), b.new_id());
    }

    #[test]
    fn test_sessions_do_not_collide() {
        let mut a = IdGenerator::new("form-builder/3");
        let mut b = IdGenerator::new("form-builder/2");
        assert_ne!(a.new_id(), b.new_id());
    }

    #[test]
    fn test_prefix_is_fixed_width_hex() {
        let id = IdGenerator::new("").new_id();
        let (prefix, counter) = id.split_once('-').unwrap();
        assert_eq!(prefix.len(), 8);
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(counter, "1");
    }
}
