//! CLI integration tests for kube-explain binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SWAGGER: &str = "tests/fixtures/kube-swagger.json";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kube-explain"))
}

// Helper to create a temp file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod field_command {
    use super::*;

    #[test]
    fn explains_kind() {
        cmd()
            .args(["field", SWAGGER, "Deployment"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Deployment: Deployment enables declarative updates",
            ))
            .stdout(predicate::str::contains("**apiVersion** (string)"));
    }

    #[test]
    fn explains_primitive_field() {
        cmd()
            .args(["field", SWAGGER, "Deployment.metadata.generation"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("**generation** (integer)"));
    }

    #[test]
    fn json_output() {
        cmd()
            .args(["field", SWAGGER, "Pod.metadata.uid", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind": "simple""#))
            .stdout(predicate::str::contains(r#""name": "uid""#));
    }

    #[test]
    fn missing_field_exits_one() {
        cmd()
            .args(["field", SWAGGER, "Deployment.metadata.biscuits"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("**biscuits:** field does not exist"));
    }

    #[test]
    fn missing_field_json() {
        cmd()
            .args(["field", SWAGGER, "Deployment.metadata.biscuits", "--json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""field":"biscuits""#));
    }

    #[test]
    fn api_version_flag() {
        cmd()
            .args(["field", SWAGGER, "Deployment", "--api-version", "v1"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("kind does not exist"));
    }
}

mod format_command {
    use super::*;

    #[test]
    fn formats_file() {
        let dir = TempDir::new().unwrap();
        let raw = write_temp_file(
            &dir,
            "explain.txt",
            "FIELD: replicas <integer>\n\nDESCRIPTION:\n     Number of desired pods.",
        );

        cmd()
            .args(["format", raw.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("**FIELD:** replicas <integer>"))
            .stdout(predicate::str::contains("\nNumber of desired pods."));
    }

    #[test]
    fn formats_stdin() {
        cmd()
            .arg("format")
            .write_stdin("DESCRIPTION:\nA thing.\n\nFIELDS:\n   name <string>\n     The name.\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("**name** <string>\n\nThe name."));
    }

    #[test]
    fn passes_through_json() {
        cmd()
            .args(["format", "--json"])
            .write_stdin("{\"kind\":\"Status\"}")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind":"raw""#));
    }
}

mod hover_command {
    use super::*;

    const MANIFEST: &str = r#"{
    "apiVersion": "apps/v1beta1",
    "kind": "Deployment",
    "metadata": {
        "name": "web",
        "generation": 2
    }
}"#;

    #[test]
    fn prints_reference() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "deploy.json", MANIFEST);

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "6"])
            .assert()
            .success()
            .stdout("Deployment.metadata.generation\n");
    }

    #[test]
    fn explains_with_schema() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "deploy.json", MANIFEST);

        cmd()
            .args([
                "hover",
                doc.to_str().unwrap(),
                "--line",
                "6",
                "--schema",
                SWAGGER,
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("**generation** (integer)"));
    }

    #[test]
    fn yaml_manifest() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "pod.yaml",
            "apiVersion: v1\nkind: Pod\nspec:\n  containers: []\n",
        );

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "3"])
            .assert()
            .success()
            .stdout("Pod.spec\n");
    }

    #[test]
    fn nested_yaml_field() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "deploy.yaml",
            "apiVersion: apps/v1beta1\n\
             kind: Deployment\n\
             spec:\n  \
             template:\n    \
             spec:\n      \
             restartPolicy: Always\n",
        );

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "5"])
            .assert()
            .success()
            .stdout("Deployment.spec.template.spec\n");

        cmd()
            .args([
                "hover",
                doc.to_str().unwrap(),
                "--line",
                "5",
                "--schema",
                SWAGGER,
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "spec: Specification of the desired behavior of the pod.",
            ));
    }

    #[test]
    fn not_an_api_object() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "data.json", "{\n  \"name\": \"x\"\n}");

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "2"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no kind"));
    }

    #[test]
    fn unknown_extension_needs_language() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "manifest.txt", MANIFEST);

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "3"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--language"));

        cmd()
            .args([
                "hover",
                doc.to_str().unwrap(),
                "--line",
                "3",
                "--language",
                "json",
            ])
            .assert()
            .success()
            .stdout("Deployment\n");
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn schema_not_found() {
        cmd()
            .args(["field", "/nonexistent/swagger.json", "Pod"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn invalid_json_schema() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "bad.json", r#"{ not valid json"#);

        cmd()
            .args(["field", schema.to_str().unwrap(), "Pod"])
            .assert()
            .code(2);
    }

    #[test]
    fn invalid_manifest() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "broken.json", "{ \"kind\": ");

        cmd()
            .args(["hover", doc.to_str().unwrap(), "--line", "1"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Document Kubernetes API fields"));
    }

    #[test]
    fn version_flag() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("kube-explain"));
    }

    #[test]
    fn missing_path_argument() {
        cmd()
            .args(["field", SWAGGER])
            .assert()
            .failure()
            .stderr(predicate::str::contains("PATH"));
    }
}
