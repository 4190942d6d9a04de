use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable pointing at the kubeconfig to use
pub const KUBE_CONFIG_PATH: &str = "KUBE_CONFIG_PATH";

/// Where to find the kubeconfig: `$KUBE_CONFIG_PATH`, falling back to `~/.kube/config`
pub fn kubeconfig_path() -> Result<PathBuf> {
    resolve_kubeconfig_path(std::env::var_os(KUBE_CONFIG_PATH).map(PathBuf::from), dirs::home_dir())
}

fn resolve_kubeconfig_path(from_env: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    home.map(|h| h.join(".kube").join("config"))
        .ok_or_else(|| Error::configuration("could not determine home directory"))
}

#[test]
fn env_path_wins() {
    let path = resolve_kubeconfig_path(Some("/etc/kube/admin.conf".into()), Some("/home/katy".into())).unwrap();
    assert_eq!(path, PathBuf::from("/etc/kube/admin.conf"));
}

#[test]
fn falls_back_to_home() {
    let path = resolve_kubeconfig_path(None, Some("/home/katy".into())).unwrap();
    assert_eq!(path, PathBuf::from("/home/katy/.kube/config"));

    let path = resolve_kubeconfig_path(Some("".into()), Some("/home/katy".into())).unwrap();
    assert_eq!(path, PathBuf::from("/home/katy/.kube/config"));
}

#[test]
fn no_home_is_a_configuration_error() {
    assert!(matches!(
        resolve_kubeconfig_path(None, None),
        Err(Error::Configuration(_))
    ));
}
