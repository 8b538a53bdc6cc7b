//! Tests for Resource accessors and strategic-merge application.

#[cfg(test)]
mod tests {
    use crate::resource::{is_internal_annotation, Resource};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
  labels:
    app: web
  annotations:
    internal.config.kubernetes.io/id: "3"
    config.kubernetes.io/path: "deploy.yaml"
    team: platform
spec:
  replicas: 3
"#;

    #[test]
    fn test_identity_accessors() {
        let r = Resource::from_yaml(DEPLOYMENT).unwrap();
        assert_eq!(r.api_version(), "apps/v1");
        assert_eq!(r.kind(), "Deployment");
        assert_eq!(r.name(), "web");
        assert_eq!(r.namespace(), "prod");
        assert_eq!(r.cur_id().to_string(), "apps/v1/Deployment/prod/web");
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        assert!(Resource::from_yaml("- a\n- b\n").is_err());
        assert!(Resource::from_yaml("42").is_err());
    }

    #[test]
    fn test_internal_annotation_recognition() {
        assert!(is_internal_annotation("internal.config.kubernetes.io/id"));
        assert!(is_internal_annotation("config.kubernetes.io/path"));
        assert!(is_internal_annotation("config.kubernetes.io/index"));
        assert!(!is_internal_annotation("team"));
        assert!(!is_internal_annotation("config.kubernetes.io/other"));
    }

    #[test]
    fn test_internal_annotation_snapshot() {
        let r = Resource::from_yaml(DEPLOYMENT).unwrap();
        let snapshot = r.internal_annotations();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get("internal.config.kubernetes.io/id"),
            Some(&"3".to_string())
        );
        assert!(!snapshot.contains_key("team"));
    }

    #[test]
    fn test_restore_internal_annotations_after_wipe() {
        let mut r = Resource::from_yaml(DEPLOYMENT).unwrap();
        let snapshot = r.internal_annotations();

        // Simulate an op list replacing the annotation map wholesale.
        r.body_mut()["metadata"]["annotations"] = json!({"injected": "yes"});
        r.restore_internal_annotations(&snapshot);

        let annotations = r.annotations();
        assert_eq!(annotations.get("injected"), Some(&"yes".to_string()));
        assert_eq!(
            annotations.get("internal.config.kubernetes.io/id"),
            Some(&"3".to_string())
        );
        assert_eq!(
            annotations.get("config.kubernetes.io/path"),
            Some(&"deploy.yaml".to_string())
        );
    }

    #[test]
    fn test_restore_creates_missing_annotation_map() {
        let mut r = Resource::from_yaml("apiVersion: v1\nkind: Service\nmetadata:\n  name: svc\n")
            .unwrap();
        let mut snapshot = std::collections::BTreeMap::new();
        snapshot.insert(
            "config.kubernetes.io/index".to_string(),
            "0".to_string(),
        );
        r.restore_internal_annotations(&snapshot);
        assert_eq!(
            r.annotations().get("config.kubernetes.io/index"),
            Some(&"0".to_string())
        );
    }

    #[test]
    fn test_apply_sm_patch_merges_in_place() {
        let mut target = Resource::from_yaml(DEPLOYMENT).unwrap();
        let patch = Resource::from_yaml(
            "metadata:\n  name: web\nspec:\n  replicas: 5\n",
        )
        .unwrap();
        target.apply_sm_patch(&patch).unwrap();
        assert_eq!(target.body()["spec"]["replicas"], json!(5));
        assert_eq!(target.name(), "web");
        assert!(target.previous_ids().is_empty());
    }

    #[test]
    fn test_apply_sm_patch_rejects_name_change() {
        let mut target = Resource::from_yaml(DEPLOYMENT).unwrap();
        let patch = Resource::from_yaml("metadata:\n  name: renamed\n").unwrap();
        let err = target.apply_sm_patch(&patch).unwrap_err();
        assert!(err.to_string().contains("allowNameChange"));
        // Target untouched on rejection.
        assert_eq!(target.name(), "web");
    }

    #[test]
    fn test_apply_sm_patch_allows_name_change_when_flagged() {
        let mut target = Resource::from_yaml(DEPLOYMENT).unwrap();
        let mut patch = Resource::from_yaml("metadata:\n  name: renamed\n").unwrap();
        patch.allow_name_change();
        target.apply_sm_patch(&patch).unwrap();
        assert_eq!(target.name(), "renamed");
        // The pre-rename identity is recorded.
        assert_eq!(target.previous_ids().len(), 1);
        assert_eq!(target.previous_ids()[0].name, "web");
        assert_eq!(target.org_id().name, "web");
    }

    #[test]
    fn test_apply_sm_patch_rejects_kind_change() {
        let mut target = Resource::from_yaml(DEPLOYMENT).unwrap();
        let patch =
            Resource::from_yaml("kind: StatefulSet\nmetadata:\n  name: web\n").unwrap();
        let err = target.apply_sm_patch(&patch).unwrap_err();
        assert!(err.to_string().contains("allowKindChange"));
    }
}
