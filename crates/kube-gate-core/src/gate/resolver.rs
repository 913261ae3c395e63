//! Hierarchical gate resolution
//!
//! The root flag is a kill-switch over both locators. Once it is open, the
//! ConfigMap and Secret flags are read independently. Every flag defaults to
//! enabled when it is not set.

use crate::flags::{FlagKey, FlagResult, FlagSource};

use super::decision::GateDecision;

/// Value used for any flag that is not explicitly set
pub const DEFAULT_ENABLED: bool = true;

/// Computes a [`GateDecision`] from a [`FlagSource`]
///
/// Resolution does no I/O and keeps no state; calling it twice on the same
/// snapshot returns equal decisions.
///
/// # Example
///
/// ```
/// use kube_gate_core::flags::{FlagKey, MemoryFlagSource};
/// use kube_gate_core::gate::{GateDecision, GateResolver};
///
/// let flags = MemoryFlagSource::new().with(FlagKey::CONFIG.as_str(), "false");
/// let decision = GateResolver::resolve(&flags).unwrap();
/// assert_eq!(decision, GateDecision::new(false, true));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GateResolver;

impl GateResolver {
    /// Resolve both gates
    ///
    /// When the root flag is `false` the sub-flags are not consulted at all.
    /// Any lookup error is returned unchanged.
    pub fn resolve(flags: &dyn FlagSource) -> FlagResult<GateDecision> {
        if !read_flag(flags, &FlagKey::ROOT)? {
            return Ok(GateDecision::disabled());
        }

        Ok(GateDecision {
            activate_config_source: read_flag(flags, &FlagKey::CONFIG)?,
            activate_secret_source: read_flag(flags, &FlagKey::SECRETS)?,
        })
    }
}

fn read_flag(flags: &dyn FlagSource, key: &FlagKey) -> FlagResult<bool> {
    Ok(flags.get(key)?.unwrap_or(DEFAULT_ENABLED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{FlagError, MemoryFlagSource};

    fn flags(pairs: &[(FlagKey, bool)]) -> MemoryFlagSource {
        let source = MemoryFlagSource::new();
        for (key, value) in pairs {
            source.set(key.as_str(), value.to_string());
        }
        source
    }

    #[test]
    fn test_empty_source_enables_everything() {
        let decision = GateResolver::resolve(&MemoryFlagSource::new()).unwrap();
        assert_eq!(decision, GateDecision::new(true, true));
    }

    #[test]
    fn test_root_disabled() {
        let decision = GateResolver::resolve(&flags(&[(FlagKey::ROOT, false)])).unwrap();
        assert_eq!(decision, GateDecision::new(false, false));
    }

    #[test]
    fn test_both_sub_flags_disabled_with_root_absent() {
        let decision = GateResolver::resolve(&flags(&[
            (FlagKey::CONFIG, false),
            (FlagKey::SECRETS, false),
        ]))
        .unwrap();
        assert_eq!(decision, GateDecision::new(false, false));
    }

    #[test]
    fn test_root_enabled_defaults_sub_flags() {
        let decision = GateResolver::resolve(&flags(&[(FlagKey::ROOT, true)])).unwrap();
        assert_eq!(decision, GateDecision::new(true, true));
    }

    #[test]
    fn test_root_enabled_config_disabled() {
        let decision = GateResolver::resolve(&flags(&[
            (FlagKey::ROOT, true),
            (FlagKey::CONFIG, false),
        ]))
        .unwrap();
        assert_eq!(decision, GateDecision::new(false, true));
    }

    #[test]
    fn test_root_disabled_overrides_every_combination() {
        for config in [None, Some(true), Some(false)] {
            for secrets in [None, Some(true), Some(false)] {
                let mut pairs = vec![(FlagKey::ROOT, false)];
                pairs.extend(config.map(|v| (FlagKey::CONFIG, v)));
                pairs.extend(secrets.map(|v| (FlagKey::SECRETS, v)));

                let decision = GateResolver::resolve(&flags(&pairs)).unwrap();
                assert_eq!(decision, GateDecision::disabled(), "config={config:?} secrets={secrets:?}");
            }
        }
    }

    #[test]
    fn test_sub_flags_are_independent_when_root_open() {
        for root in [None, Some(true)] {
            for config in [None, Some(true), Some(false)] {
                for secrets in [None, Some(true), Some(false)] {
                    let mut pairs = Vec::new();
                    pairs.extend(root.map(|v| (FlagKey::ROOT, v)));
                    pairs.extend(config.map(|v| (FlagKey::CONFIG, v)));
                    pairs.extend(secrets.map(|v| (FlagKey::SECRETS, v)));

                    let decision = GateResolver::resolve(&flags(&pairs)).unwrap();
                    assert_eq!(decision.activate_config_source, config.unwrap_or(true));
                    assert_eq!(decision.activate_secret_source, secrets.unwrap_or(true));
                }
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let source = flags(&[(FlagKey::SECRETS, false)]);
        let first = GateResolver::resolve(&source).unwrap();
        let second = GateResolver::resolve(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_sub_flag_propagates() {
        let source = MemoryFlagSource::new().with(FlagKey::SECRETS.as_str(), "enabled");
        match GateResolver::resolve(&source) {
            Err(FlagError::InvalidValue { key, .. }) => assert_eq!(key, FlagKey::SECRETS.as_str()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_root_propagates() {
        let source = MemoryFlagSource::new().with(FlagKey::ROOT.as_str(), "disabled");
        assert!(matches!(GateResolver::resolve(&source), Err(FlagError::InvalidValue { .. })));
    }

    #[test]
    fn test_closed_root_skips_malformed_sub_flags() {
        let source = MemoryFlagSource::new()
            .with(FlagKey::ROOT.as_str(), "false")
            .with(FlagKey::CONFIG.as_str(), "garbage");
        assert_eq!(GateResolver::resolve(&source).unwrap(), GateDecision::disabled());
    }
}
