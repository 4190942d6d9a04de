use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Pod;

use crate::pod::StatusView;

/// Public extension trait for `Pod`
pub trait ContainersExt {
    /// True if every container is ready. A pod without container statuses counts as ready.
    fn containers_ready(&self) -> bool;
    /// `"true"`/`"false"` for each container, keyed by image.
    ///
    /// Containers sharing an image collapse into a single entry, and the last one listed wins.
    fn container_ready_statuses(&self) -> BTreeMap<String, String>;
}

impl ContainersExt for Pod {
    fn containers_ready(&self) -> bool {
        StatusView::from(self)
            .container_statuses
            .iter()
            .all(|c| c.ready)
    }

    fn container_ready_statuses(&self) -> BTreeMap<String, String> {
        let mut statuses = BTreeMap::new();
        for c in StatusView::from(self).container_statuses {
            statuses.insert(c.image.clone(), c.ready.to_string());
        }
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{ContainerStatus, PodStatus};

    fn container(name: &str, image: &str, ready: bool) -> ContainerStatus {
        ContainerStatus {
            name: name.into(),
            image: image.into(),
            ready,
            ..Default::default()
        }
    }

    fn pod_with(containers: Vec<ContainerStatus>) -> Pod {
        Pod {
            status: Some(PodStatus {
                container_statuses: Some(containers),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn no_containers_are_ready() {
        assert!(pod_with(vec![]).containers_ready());
        assert!(Pod::default().containers_ready());
        assert!(Pod::default().container_ready_statuses().is_empty());
    }

    #[test]
    fn one_unready_container_is_enough() {
        let pod = pod_with(vec![
            container("app", "app:1.2.3", true),
            container("cloudsql-proxy", "cloudsql-proxy:2", false),
        ]);
        assert!(!pod.containers_ready());

        let pod = pod_with(vec![
            container("app", "app:1.2.3", true),
            container("cloudsql-proxy", "cloudsql-proxy:2", true),
        ]);
        assert!(pod.containers_ready());
    }

    #[test]
    fn statuses_are_keyed_by_image() {
        let pod = pod_with(vec![
            container("app", "app:1.2.3", true),
            container("linkerd-proxy", "linkerd-proxy:stable", false),
        ]);
        let statuses = pod.container_ready_statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses["app:1.2.3"], "true");
        assert_eq!(statuses["linkerd-proxy:stable"], "false");
    }

    #[test]
    fn shared_image_keeps_last_container() {
        let pod = pod_with(vec![
            container("web", "nginx:1.0", true),
            container("static", "nginx:1.0", false),
        ]);
        let statuses = pod.container_ready_statuses();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses["nginx:1.0"], "false");

        let pod = pod_with(vec![
            container("static", "nginx:1.0", false),
            container("web", "nginx:1.0", true),
        ]);
        assert_eq!(pod.container_ready_statuses()["nginx:1.0"], "true");
    }
}
