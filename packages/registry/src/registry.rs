use crate::prototype::Prototype;
use crate::route::{NotFound, Route, FORM_BUILDER};
use crate::seeds;
use formsmith_editor::Capabilities;
use std::collections::BTreeMap;

/// A feature and its registered versions, in registration order
#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub slug: String,
    pub versions: Vec<Prototype>,
}

impl Feature {
    pub fn version(&self, id: &str) -> Option<&Prototype> {
        self.versions.iter().find(|p| p.version == id)
    }

    /// Most recently registered version
    pub fn latest(&self) -> Option<&Prototype> {
        self.versions.last()
    }
}

/// Result of a registry lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Prototype),
    NotFound(NotFound),
}

impl<'a> Resolution<'a> {
    pub fn found(&self) -> Option<&'a Prototype> {
        match self {
            Resolution::Found(prototype) => Some(prototype),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    features: BTreeMap<String, Feature>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the form builder's design iterations
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            Prototype::new(FORM_BUILDER, "1", "Drag & Drop Builder", seeds::basic())
                .with_summary("Reorder sections and fields by dragging; rename inline")
                .with_capabilities(Capabilities {
                    drag_reorder: true,
                    inline_edit: true,
                    bulk_actions: false,
                    history: false,
                }),
        );
        registry.register(
            Prototype::new(FORM_BUILDER, "2", "Bulk Editing", seeds::inspection())
                .with_summary("Adds multi-select with bulk delete, duplicate and required toggles")
                .with_capabilities(Capabilities {
                    drag_reorder: true,
                    inline_edit: true,
                    bulk_actions: true,
                    history: false,
                }),
        );
        registry.register(
            Prototype::new(FORM_BUILDER, "3", "Undo & Redo", seeds::inspection())
                .with_summary("Adds snapshot history for every builder action")
                .with_capabilities(Capabilities::all()),
        );

        registry
    }

    /// Add a prototype, replacing any existing one with the same route
    pub fn register(&mut self, prototype: Prototype) {
        let feature = self
            .features
            .entry(prototype.feature.clone())
            .or_insert_with(|| Feature {
                slug: prototype.feature.clone(),
                versions: Vec::new(),
            });

        match feature
            .versions
            .iter_mut()
            .find(|p| p.version == prototype.version)
        {
            Some(existing) => {
                tracing::debug!("registry: replacing {}", existing.path());
                *existing = prototype;
            }
            None => feature.versions.push(prototype),
        }
    }

    pub fn get(&self, feature: &str, version: &str) -> Resolution<'_> {
        let Some(entry) = self.features.get(feature) else {
            tracing::debug!("registry: unknown feature {}", feature);
            return Resolution::NotFound(NotFound::UnknownFeature {
                feature: feature.to_string(),
            });
        };

        match entry.version(version) {
            Some(prototype) => Resolution::Found(prototype),
            None => {
                tracing::debug!("registry: {} has no version {}", feature, version);
                Resolution::NotFound(NotFound::UnknownVersion {
                    feature: feature.to_string(),
                    version: version.to_string(),
                })
            }
        }
    }

    pub fn resolve(&self, route: &Route) -> Resolution<'_> {
        self.get(&route.feature, &route.version)
    }

    /// Resolve a navigation path such as `/prototypes/form-builder/version/2`
    pub fn resolve_path(&self, path: &str) -> Resolution<'_> {
        match Route::parse(path) {
            Ok(route) => self.resolve(&route),
            Err(reason) => {
                tracing::debug!("registry: {}", reason);
                Resolution::NotFound(reason)
            }
        }
    }

    pub fn feature(&self, slug: &str) -> Option<&Feature> {
        self.features.get(slug)
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Every prototype, grouped by feature
    pub fn prototypes(&self) -> impl Iterator<Item = &Prototype> {
        self.features.values().flat_map(|f| f.versions.iter())
    }

    pub fn len(&self) -> usize {
        self.prototypes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_layout::Layout;

    #[test]
    fn test_builtin_versions() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 3);

        let feature = registry.feature(FORM_BUILDER).unwrap();
        let versions: Vec<_> = feature.versions.iter().map(|p| p.version.as_str()).collect();
        assert_eq!(versions, vec!["1", "2", "3"]);
        assert_eq!(feature.latest().map(|p| p.version.as_str()), Some("3"));
    }

    #[test]
    fn test_capabilities_grow_per_version() {
        let registry = Registry::builtin();
        let caps = |v: &str| registry.get(FORM_BUILDER, v).found().unwrap().capabilities;

        assert!(!caps("1").bulk_actions && !caps("1").history);
        assert!(caps("2").bulk_actions && !caps("2").history);
        assert_eq!(caps("3"), Capabilities::all());
    }

    #[test]
    fn test_seeds_are_consistent() {
        for prototype in Registry::builtin().prototypes() {
            assert!(prototype.seed.is_consistent(), "{}", prototype.path());
            assert!(prototype.seed.sections[0].is_system);
        }
    }

    #[test]
    fn test_unknown_feature_and_version() {
        let registry = Registry::builtin();

        assert_eq!(
            registry.get("survey", "1"),
            Resolution::NotFound(NotFound::UnknownFeature {
                feature: "survey".to_string()
            })
        );
        assert_eq!(
            registry.get(FORM_BUILDER, "9"),
            Resolution::NotFound(NotFound::UnknownVersion {
                feature: FORM_BUILDER.to_string(),
                version: "9".to_string()
            })
        );
    }

    #[test]
    fn test_register_replaces_same_route() {
        let mut registry = Registry::new();
        registry.register(Prototype::new("demo", "1", "First", Layout::new()));
        registry.register(Prototype::new("demo", "1", "Second", Layout::new()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("demo", "1").found().unwrap().title, "Second");
    }
}
