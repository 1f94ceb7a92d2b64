//! Launch mode selection.
use crate::launch::config::{ALPHA_LAUNCH_TRAIT, LEGACY_LAUNCH_TRAIT};
use crate::launch::types::LaunchMode;

/// Legacy when the traits contain `legacyLaunch` or `alphaLaunch`, modern otherwise
pub fn select_mode<I, S>(traits: I) -> LaunchMode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let legacy = traits.into_iter().any(|t| {
        let t = t.as_ref();
        t == LEGACY_LAUNCH_TRAIT || t == ALPHA_LAUNCH_TRAIT
    });

    if legacy {
        LaunchMode::Legacy
    } else {
        LaunchMode::Modern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_traits_select_legacy() {
        assert_eq!(select_mode(["legacyLaunch"]), LaunchMode::Legacy);
        assert_eq!(select_mode(["alphaLaunch"]), LaunchMode::Legacy);
        assert_eq!(
            select_mode(["noapplet", "alphaLaunch", "legacyLaunch"]),
            LaunchMode::Legacy
        );
    }

    #[test]
    fn everything_else_is_modern() {
        assert_eq!(select_mode(Vec::<String>::new()), LaunchMode::Modern);
        assert_eq!(
            select_mode(["FirstThreadOnMacOS", "LegacyLaunch", "legacylaunch"]),
            LaunchMode::Modern
        );
    }
}
