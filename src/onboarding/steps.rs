//! Step visibility — which of the nine steps a package selection goes
//! through, and how navigation walks that sequence.

use super::model::{Package, PackageInfo, PackageType};
use super::schema::TOTAL_STEPS;

/// The ordered steps visible for a package selection.
///
/// Email-only clients skip the website steps and the domain/hosting step
/// (email setup handles the domain). Hosting-only clients skip the
/// website steps but keep domain/hosting and email setup. Everyone else
/// goes through the full flow.
pub fn visible_steps(info: &PackageInfo) -> Vec<u8> {
    if info.package == Package::EmailSetup || info.package_type == PackageType::EmailOnly {
        return vec![1, 2, 7, 8, 9];
    }
    if info.package == Package::HostingOnly {
        return vec![1, 2, 6, 7, 8, 9];
    }
    (1..=TOTAL_STEPS).collect()
}

/// The next visible step after `current`, or `current` itself when it is
/// the last visible step or not in the sequence at all.
pub fn next_visible_step(info: &PackageInfo, current: u8) -> u8 {
    let steps = visible_steps(info);
    match steps.iter().position(|&s| s == current) {
        Some(idx) if idx + 1 < steps.len() => steps[idx + 1],
        _ => current,
    }
}

/// The previous visible step before `current`, or `current` itself at the
/// front boundary or when `current` is not in the sequence.
pub fn previous_visible_step(info: &PackageInfo, current: u8) -> u8 {
    let steps = visible_steps(info);
    match steps.iter().position(|&s| s == current) {
        Some(idx) if idx > 0 => steps[idx - 1],
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PACKAGES: [Package; 6] = [
        Package::BasicWebsite,
        Package::StandardWebsite,
        Package::HostingOnly,
        Package::StarterBundle,
        Package::EmailSetup,
        Package::Custom,
    ];

    const ALL_TYPES: [PackageType; 5] = [
        PackageType::WebsiteOnly,
        PackageType::WebsiteHosting,
        PackageType::EmailOnly,
        PackageType::StarterBundle,
        PackageType::Custom,
    ];

    fn info(package: Package, package_type: PackageType) -> PackageInfo {
        PackageInfo {
            package,
            package_type,
            max_pages: 3,
        }
    }

    #[test]
    fn sequence_is_increasing_and_anchored_for_every_combination() {
        for package in ALL_PACKAGES {
            for package_type in ALL_TYPES {
                let steps = visible_steps(&info(package, package_type));
                assert!(
                    steps.windows(2).all(|w| w[0] < w[1]),
                    "{package}/{package_type}: not strictly increasing: {steps:?}"
                );
                assert!(steps.iter().all(|&s| (1..=9).contains(&s)));
                for anchor in [1, 2, 8, 9] {
                    assert!(
                        steps.contains(&anchor),
                        "{package}/{package_type}: missing step {anchor}"
                    );
                }
            }
        }
    }

    #[test]
    fn email_only_flow() {
        assert_eq!(
            visible_steps(&info(Package::EmailSetup, PackageType::EmailOnly)),
            vec![1, 2, 7, 8, 9]
        );
        // The type alone is enough, whatever the package key.
        assert_eq!(
            visible_steps(&info(Package::Custom, PackageType::EmailOnly)),
            vec![1, 2, 7, 8, 9]
        );
    }

    #[test]
    fn hosting_only_skips_website_steps() {
        let steps = visible_steps(&info(Package::HostingOnly, PackageType::Custom));
        assert_eq!(steps, vec![1, 2, 6, 7, 8, 9]);
        for skipped in [3, 4, 5] {
            assert!(!steps.contains(&skipped));
        }
    }

    #[test]
    fn website_packages_see_everything() {
        for package in [Package::BasicWebsite, Package::StandardWebsite, Package::StarterBundle] {
            assert_eq!(
                visible_steps(&info(package, PackageType::WebsiteHosting)),
                (1..=9).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn next_and_previous_are_inverse_inside_the_sequence() {
        for package in ALL_PACKAGES {
            for package_type in ALL_TYPES {
                let pkg = info(package, package_type);
                let steps = visible_steps(&pkg);
                for window in steps.windows(2) {
                    assert_eq!(next_visible_step(&pkg, window[0]), window[1]);
                    assert_eq!(previous_visible_step(&pkg, window[1]), window[0]);
                }
            }
        }
    }

    #[test]
    fn boundaries_are_identity() {
        for package in ALL_PACKAGES {
            for package_type in ALL_TYPES {
                let pkg = info(package, package_type);
                let steps = visible_steps(&pkg);
                let first = *steps.first().unwrap();
                let last = *steps.last().unwrap();
                assert_eq!(previous_visible_step(&pkg, first), first);
                assert_eq!(next_visible_step(&pkg, last), last);
            }
        }
    }

    #[test]
    fn hidden_step_is_identity() {
        let pkg = info(Package::EmailSetup, PackageType::EmailOnly);
        // Step 5 is not in the email-only sequence.
        assert_eq!(next_visible_step(&pkg, 5), 5);
        assert_eq!(previous_visible_step(&pkg, 5), 5);
    }

    #[test]
    fn hosting_only_walk() {
        let pkg = info(Package::HostingOnly, PackageType::Custom);
        assert_eq!(next_visible_step(&pkg, 2), 6);
        assert_eq!(next_visible_step(&pkg, 6), 7);
        assert_eq!(previous_visible_step(&pkg, 6), 2);
    }
}
