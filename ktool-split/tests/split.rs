//! End-to-end runs of `split` over temporary directories

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_json_diff::assert_json_eq;
use ktool_split::{split, Error, Event, IoAction, SplitConfig, TemplateError};
use serde_json::{json, Value};

const MIXED: &str = r#"
apiVersion: v1
kind: Namespace
metadata:
  name: prod
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
  labels:
    app: web
spec:
  replicas: 2
---
# only a comment
---
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: reader
rules: []
---
apiVersion: v1
kind: Service
metadata:
  name: web
  namespace: staging
"#;

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Relative paths of every file below `root`, sorted
fn tree(root: &Path) -> Vec<String> {
    let mut files = vec![];
    let mut dirs = vec![root.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                dirs.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                files.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

fn read_yaml(path: &Path) -> Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn one_file_per_object_sorted_by_scope() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    let config = SplitConfig::new([file]).output_dir(out.path());
    let mut events = vec![];
    let summary = split(&config, &mut events).unwrap();

    assert_eq!(summary.objects, 4);
    assert_eq!(summary.file_count, 1);
    assert_eq!(tree(out.path()), vec![
        "cluster-scoped/prod.namespace.yaml",
        "cluster-scoped/reader.clusterrole.yaml",
        "namespaces/prod/web.deployment.yaml",
        "namespaces/staging/web.service.yaml",
    ]);
    let writes = events.iter().filter(|e| matches!(e, Event::Writing { .. })).count();
    assert_eq!(writes, 4);
}

#[test]
fn written_objects_round_trip() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    split(&SplitConfig::new([file]).output_dir(out.path()), &mut vec![]).unwrap();

    let deployment = read_yaml(&out.path().join("namespaces/prod/web.deployment.yaml"));
    assert_json_eq!(
        deployment,
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "web",
                "namespace": "prod",
                "labels": { "app": "web" }
            },
            "spec": { "replicas": 2 }
        })
    );
    let role = read_yaml(&out.path().join("cluster-scoped/reader.clusterrole.yaml"));
    assert_json_eq!(
        role,
        json!({
            "apiVersion": "rbac.authorization.k8s.io/v1",
            "kind": "ClusterRole",
            "metadata": { "name": "reader" },
            "rules": []
        })
    );
}

#[test]
fn lists_are_flattened() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let list = json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": [
            { "apiVersion": "v1", "kind": "ConfigMap", "metadata": { "name": "a", "namespace": "dev" } },
            { "apiVersion": "v1", "kind": "ConfigMap", "metadata": { "name": "b", "namespace": "dev" } }
        ]
    });
    let file = write_input(input.path(), "list.json", &list.to_string());

    let summary = split(&SplitConfig::new([file]).output_dir(out.path()), &mut vec![]).unwrap();
    assert_eq!(summary.objects, 2);
    assert_eq!(tree(out.path()), vec![
        "namespaces/dev/a.configmap.yaml",
        "namespaces/dev/b.configmap.yaml",
    ]);
}

#[test]
fn directories_expand_to_manifest_files() {
    let input = tempfile::tempdir().unwrap();
    write_input(
        input.path(),
        "a.yaml",
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: a\n",
    );
    write_input(input.path(), "notes.txt", "not a manifest");
    fs::create_dir(input.path().join("nested")).unwrap();
    write_input(
        &input.path().join("nested"),
        "b.yml",
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: b\n",
    );

    let flat = tempfile::tempdir().unwrap();
    let config = SplitConfig::new([input.path()]).output_dir(flat.path());
    assert_eq!(split(&config, &mut vec![]).unwrap().objects, 1);
    assert_eq!(tree(flat.path()), vec!["cluster-scoped/a.namespace.yaml"]);

    let deep = tempfile::tempdir().unwrap();
    let config = SplitConfig {
        recursive: true,
        ..SplitConfig::new([input.path()]).output_dir(deep.path())
    };
    assert_eq!(split(&config, &mut vec![]).unwrap().objects, 2);
    assert_eq!(tree(deep.path()), vec![
        "cluster-scoped/a.namespace.yaml",
        "cluster-scoped/b.namespace.yaml",
    ]);
}

#[test]
fn custom_dir_names_and_template() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    let config = SplitConfig {
        namespaced_dir_name: "ns".into(),
        cluster_scoped_dir_name: "global".into(),
        ..SplitConfig::new([file])
            .output_dir(out.path())
            .filename_template("{{ .GVK.Group }}_{{ .GVK.Version }}_{{ .Name }}.yaml")
    };
    split(&config, &mut vec![]).unwrap();
    assert_eq!(tree(out.path()), vec![
        "global/_v1_prod.yaml",
        "global/rbac.authorization.k8s.io_v1_reader.yaml",
        "ns/prod/apps_v1_web.yaml",
        "ns/staging/_v1_web.yaml",
    ]);
}

#[test]
fn colliding_filenames_overwrite() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    // both `web` objects land in different namespaces, the cluster-scoped ones collide
    let config = SplitConfig::new([file])
        .output_dir(out.path())
        .filename_template("{{ .Namespace }}same.yaml");
    let summary = split(&config, &mut vec![]).unwrap();
    assert_eq!(summary.objects, 4);
    assert_eq!(tree(out.path()), vec![
        "cluster-scoped/same.yaml",
        "namespaces/prod/prodsame.yaml",
        "namespaces/staging/stagingsame.yaml",
    ]);
    let last = read_yaml(&out.path().join("cluster-scoped/same.yaml"));
    assert_eq!(last["kind"], "ClusterRole");
}

#[test]
fn empty_filename_stops_the_run() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    let config = SplitConfig::new([file])
        .output_dir(out.path())
        .filename_template("{{ .Namespace }}");
    let err = split(&config, &mut vec![]).unwrap_err();
    assert!(matches!(err, Error::EmptyFilename));
    assert!(tree(out.path()).is_empty());
}

#[test]
fn unknown_template_field_fails() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);

    let config = SplitConfig::new([file])
        .output_dir(out.path())
        .filename_template("{{ .Labels.app }}.yaml");
    let err = split(&config, &mut vec![]).unwrap_err();
    assert!(matches!(err, Error::Template(TemplateError::Execute { .. })));
}

#[test]
fn existing_scope_directory_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(input.path(), "all.yaml", MIXED);
    fs::create_dir(out.path().join("namespaces")).unwrap();

    let err = split(&SplitConfig::new([file]).output_dir(out.path()), &mut vec![]).unwrap_err();
    match err {
        Error::Io { action, path, .. } => {
            assert_eq!(action, IoAction::MakeDirectory);
            assert_eq!(path, out.path().join("namespaces"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_input_names_the_path() {
    let out = tempfile::tempdir().unwrap();
    let missing = out.path().join("missing.yaml");
    let err = split(&SplitConfig::new([&missing]).output_dir(out.path()), &mut vec![]).unwrap_err();
    match &err {
        Error::Io {
            action: IoAction::Read,
            path,
            ..
        } => assert_eq!(path, &missing),
        other => panic!("unexpected {other:?}"),
    }
    assert!(err.to_string().starts_with("can't read "));
}

#[test]
fn malformed_document_reports_its_location() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_input(
        input.path(),
        "broken.yaml",
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: ok\n---\nmetadata:\n  name: no-kind\n",
    );

    let err = split(&SplitConfig::new([&file]).output_dir(out.path()), &mut vec![]).unwrap_err();
    match &err {
        Error::Decode(decode) => {
            assert_eq!(decode.location.path, file.display().to_string());
            assert_eq!(decode.location.document, 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    // the object before the broken document was already written
    assert_eq!(tree(out.path()), vec!["cluster-scoped/ok.namespace.yaml"]);
}

#[test]
fn api_server_lists_and_json_streams() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let pods = write_input(
        input.path(),
        "pods.yaml",
        "apiVersion: v1\nkind: PodList\nitems:\n- metadata:\n    name: p1\n    namespace: default\n",
    );
    let stream = write_input(
        input.path(),
        "stream.json",
        &format!(
            "{}\n{}",
            json!({ "apiVersion": "v1", "kind": "Namespace", "metadata": { "name": "a" } }),
            json!({ "apiVersion": "v1", "kind": "Namespace", "metadata": { "name": "b" } })
        ),
    );

    let summary = split(&SplitConfig::new([pods, stream]).output_dir(out.path()), &mut vec![]).unwrap();
    assert_eq!(summary.objects, 3);
    assert_eq!(tree(out.path()), vec![
        "cluster-scoped/a.namespace.yaml",
        "cluster-scoped/b.namespace.yaml",
        "namespaces/default/p1.pod.yaml",
    ]);
    let pod = read_yaml(&out.path().join("namespaces/default/p1.pod.yaml"));
    assert_eq!(pod["apiVersion"], "v1");
    assert_eq!(pod["kind"], "Pod");
}
