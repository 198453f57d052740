//! Parsing of host query output.

/// Value of a `Key: value` line as printed by `lsb_release`.
///
/// Returns the text after the first `:` of the first line that has one,
/// trimmed.
pub fn lsb_field(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
}

/// Whether `dpkg -l NAME` output lists NAME as installed (`ii` state).
pub fn dpkg_reports_installed(output: &str, package: &str) -> bool {
    output
        .lines()
        .find(|line| line.contains(package))
        .is_some_and(|line| line.starts_with("ii"))
}

/// Whether `update-alternatives --query c++` output selects `toolchain`.
///
/// A host without a `Value` line has no alternative configured and uses the
/// distribution default, which is accepted.
pub fn alternative_selects(output: &str, toolchain: &str) -> bool {
    let needle = format!("/{toolchain}");
    match output.lines().find(|line| line.contains("Value")) {
        None => true,
        Some(line) => line.contains(&needle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsb_release_id_and_release() {
        assert_eq!(lsb_field("Distributor ID:\tUbuntu"), Some("Ubuntu"));
        assert_eq!(lsb_field("Release:\t18.04\n"), Some("18.04"));
        assert_eq!(lsb_field("No LSB modules are available."), None);
        assert_eq!(lsb_field(""), None);
    }

    #[test]
    fn dpkg_installed_state() {
        let installed = "\
Desired=Unknown/Install/Remove/Purge/Hold
| Status=Not/Inst/Conf-files/Unpacked/halF-conf/Half-inst/trig-aWait/Trig-pend
||/ Name           Version      Architecture Description
+++-==============-============-============-=================================
ii  patchelf       0.9-1        amd64        modify properties of ELF executables";
        assert!(dpkg_reports_installed(installed, "patchelf"));

        let removed = "un  patchelf       <none>       <none>       (no description available)";
        assert!(!dpkg_reports_installed(removed, "patchelf"));
        assert!(!dpkg_reports_installed("", "patchelf"));
    }

    #[test]
    fn compiler_alternative() {
        let gcc = "Name: c++\nLink: /usr/bin/c++\nStatus: auto\nBest: /usr/bin/g++\nValue: /usr/bin/g++";
        assert!(alternative_selects(gcc, "g++"));

        let clang = "Name: c++\nStatus: manual\nBest: /usr/bin/g++\nValue: /usr/bin/clang++";
        assert!(!alternative_selects(clang, "g++"));

        assert!(alternative_selects("", "g++"));
    }
}
