//! Integration tests for the linkvault library and CLI using temporary vaults.

use linkvault::{
    CancellationToken, ChangeKind, FileChange, Settings, SpaceReplacement, TagInfo, Vault,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Create a vault on disk holding `files`.
fn make_vault(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().canonicalize().unwrap();
    for (name, content) in files {
        write(&root, name, content);
    }
    (dir, root)
}

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn open(root: &Path) -> Vault {
    Vault::open(Settings {
        vault_root: Some(root.to_path_buf()),
        ..Settings::default()
    })
}

fn names(docs: &[std::sync::Arc<linkvault::DocumentRecord>]) -> Vec<String> {
    docs.iter().map(|doc| doc.display_name.clone()).collect()
}

fn sample_vault() -> (TempDir, PathBuf) {
    make_vault(&[
        ("A.md", "# Intro\nSee [[B]] and #project.\n"),
        ("B.md", "---\ntags: [reading]\n---\n# Intro\nBack to [[a]].\n"),
        ("sub/C.md", "Nothing here but [[Missing]] and ![[photo.png]].\n"),
        (".hidden/D.md", "[[A]]\n"),
        ("notes.txt", "[[A]]\n"),
    ])
}

mod library {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scan_indexes_visible_documents_only() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        let locations: Vec<PathBuf> = vault
            .get_all_documents()
            .iter()
            .map(|doc| doc.location.clone())
            .collect();
        assert_eq!(
            locations,
            vec![root.join("A.md"), root.join("B.md"), root.join("sub/C.md")]
        );
    }

    #[test]
    fn two_note_vault_answers_every_query() {
        let (_dir, root) = make_vault(&[
            ("A.md", "See [[B]] and #project."),
            ("B.md", "# Intro\nBack to [[A]]."),
        ]);
        let vault = open(&root);
        let a = root.join("A.md");
        let b = root.join("B.md");

        assert_eq!(vault.resolve_link(&a, "B"), Some(b.clone()));
        assert_eq!(names(&vault.get_backlinks(&b)), vec!["A"]);
        assert_eq!(names(&vault.get_backlinks(&a)), vec!["B"]);
        assert_eq!(
            vault.get_all_tags(),
            vec![TagInfo {
                name: "project".to_string(),
                count: 1,
                notes: vec![a],
            }]
        );

        let hits: Vec<String> = vault
            .search("Intro", &CancellationToken::none())
            .into_iter()
            .map(|hit| hit.display_name)
            .collect();
        assert_eq!(hits, vec!["B"]);
    }

    #[test]
    fn backlinks_and_resolution() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        assert_eq!(vault.resolve_link(&root.join("A.md"), "b"), Some(root.join("B.md")));
        assert_eq!(vault.resolve_link(&root.join("A.md"), "Missing"), None);

        assert_eq!(names(&vault.get_backlinks(&root.join("A.md"))), vec!["B"]);
        assert_eq!(names(&vault.get_backlinks(&root.join("B.md"))), vec!["A"]);
        assert!(vault.get_backlinks(&root.join("sub/C.md")).is_empty());
    }

    #[test]
    fn resolve_link_target_with_heading() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        let resolved = vault.resolve_link_target(&root, "B#intro").unwrap();
        assert_eq!(resolved.location, root.join("B.md"));
        assert_eq!(resolved.heading.unwrap().text, "Intro");

        let resolved = vault.resolve_link_target(&root, "B#Nope").unwrap();
        assert!(resolved.heading.is_none());

        assert!(vault.resolve_link_target(&root, "Missing#Intro").is_none());
    }

    #[test]
    fn tags_from_body_and_front_matter() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        let tags: Vec<(String, usize)> = vault
            .get_all_tags()
            .into_iter()
            .map(|info| (info.name, info.count))
            .collect();
        assert_eq!(
            tags,
            vec![("project".to_string(), 1), ("reading".to_string(), 1)]
        );
        assert_eq!(vault.get_documents_for_tag("#Project"), vec![root.join("A.md")]);
        assert!(vault.get_documents_for_tag("unknown").is_empty());
    }

    #[test]
    fn search_matches_content() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);
        let token = CancellationToken::none();

        let hits: Vec<String> = vault
            .search("back to", &token)
            .into_iter()
            .map(|hit| hit.display_name)
            .collect();
        assert_eq!(hits, vec!["B"]);

        let hits = vault.search("INTRO", &token);
        assert_eq!(hits.len(), 2);

        assert!(vault.search("", &token).is_empty());
    }

    #[test]
    fn cancelled_search_returns_subset() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);
        let token = CancellationToken::new();
        token.cancel();

        assert!(vault.search("[[", &token).is_empty());
    }

    #[test]
    fn broken_links_skip_media() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        let broken = vault.broken_links();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].source, root.join("sub/C.md"));
        assert_eq!(broken[0].target, "Missing");
    }

    #[test]
    fn hyphen_policy_matches_spaces() {
        let (_dir, root) = make_vault(&[
            ("My Note.md", "hello\n"),
            ("Other.md", "[[my-note]]\n"),
        ]);
        let vault = open(&root);
        assert_eq!(vault.resolve_link(&root, "my-note"), None);

        vault.apply_settings(Settings {
            vault_root: Some(root.clone()),
            case_sensitive: false,
            space_replacement: SpaceReplacement::Hyphen,
        });
        assert_eq!(vault.resolve_link(&root, "my-note"), Some(root.join("My Note.md")));
        assert_eq!(names(&vault.get_backlinks(&root.join("My Note.md"))), vec!["Other"]);
    }

    #[test]
    fn incremental_changes_follow_disk() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);
        let start = vault.generation();

        write(&root, "A.md", "No links or tags any more.\n");
        vault.handle_change(FileChange::updated(root.join("A.md")));
        assert_eq!(vault.generation(), start + 1);
        assert!(vault.get_backlinks(&root.join("B.md")).is_empty());
        assert!(vault.get_documents_for_tag("project").is_empty());

        write(&root, "New.md", "[[B]]\n");
        vault.handle_change(FileChange::added(root.join("New.md")));
        assert_eq!(names(&vault.get_backlinks(&root.join("B.md"))), vec!["New"]);

        fs::remove_file(root.join("New.md")).unwrap();
        vault.handle_change(FileChange::deleted(root.join("New.md")));
        assert!(vault.get_backlinks(&root.join("B.md")).is_empty());
        assert_eq!(vault.generation(), start + 3);
    }

    #[test]
    fn unindexed_delete_does_not_notify() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);
        let start = vault.generation();

        vault.handle_change(FileChange {
            path: root.join("never-existed.md"),
            kind: ChangeKind::Deleted,
        });
        vault.handle_change(FileChange::added(root.join("notes.txt")));
        assert_eq!(vault.generation(), start);
    }

    #[test]
    fn rebuild_matches_incremental_state() {
        let (_dir, root) = sample_vault();
        let vault = open(&root);

        write(&root, "sub/C.md", "Now links [[A]] #fresh\n");
        vault.handle_change(FileChange::updated(root.join("sub/C.md")));
        let incremental = vault.get_all_documents();
        let incremental_tags = vault.get_all_tags();

        vault.rebuild();
        assert_eq!(vault.get_all_documents(), incremental);
        assert_eq!(vault.get_all_tags(), incremental_tags);
    }

    #[test]
    fn deleting_colliding_note_hands_name_back() {
        let (_dir, root) = make_vault(&[("a/Note.md", "#alpha\n"), ("b/Note.md", "#beta\n")]);
        let vault = open(&root);

        fs::remove_file(root.join("b/Note.md")).unwrap();
        vault.handle_change(FileChange::deleted(root.join("b/Note.md")));

        assert_eq!(vault.resolve_link(&root, "Note"), Some(root.join("a/Note.md")));
        let incremental = vault.get_all_documents();
        let incremental_tags = vault.get_all_tags();

        vault.rebuild();
        assert_eq!(vault.get_all_documents(), incremental);
        assert_eq!(vault.get_all_tags(), incremental_tags);
    }

    #[test]
    fn missing_root_gives_empty_index() {
        let vault = Vault::open(Settings {
            vault_root: Some(PathBuf::from("/definitely/not/a/vault")),
            ..Settings::default()
        });
        assert!(vault.get_all_documents().is_empty());
        assert!(vault.get_all_tags().is_empty());

        let unset = Vault::open(Settings::default());
        assert!(unset.get_all_documents().is_empty());
    }
}

/// Run the linkvault CLI against `root` and return (stdout, stderr, code).
fn run_cli(root: &Path, args: &[&str]) -> (String, String, i32) {
    let binary = env!("CARGO_BIN_EXE_linkvault");
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let output = Command::new(binary)
        .arg("--vault")
        .arg(root)
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute linkvault");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).unwrap()
}

mod list_command {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_all_notes() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["list"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["total"], 3);
        assert_eq!(value["notes"][0]["name"], "A");
        assert_eq!(value["notes"][2]["path"], "sub/C.md");
    }

    #[test]
    fn list_filtered_by_tag() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["list", "--tag", "reading"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["total"], 1);
        assert_eq!(value["notes"][0]["name"], "B");
    }
}

mod resolve_command {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_with_heading() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["resolve", "a#Intro"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["resolved"], "A.md");
        assert_eq!(value["heading"]["text"], "Intro");
    }

    #[test]
    fn resolve_not_found() {
        let (_dir, root) = sample_vault();
        let (_, stderr, code) = run_cli(&root, &["resolve", "Nobody"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("Nobody"));
    }
}

mod link_commands {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backlinks_of_note() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["backlinks", "B"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["note"]["path"], "B.md");
        assert_eq!(value["backlinks"][0]["name"], "A");
    }

    #[test]
    fn broken_links_check_fails() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["broken-links", "--check"]);
        assert_eq!(code, 10);
        assert_eq!(json(&stdout)["broken"][0]["target"], "Missing");

        let (_, _, code) = run_cli(&root, &["broken-links"]);
        assert_eq!(code, 0);
    }

    #[test]
    fn graph_has_edges_between_notes() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["graph"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["edges"].as_array().unwrap().len(), 2);
    }
}

mod tags_and_search_commands {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tags_summary() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["tags", "--counts-only"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["tags"][0]["tag"], "project");
        assert_eq!(value["tags"][0]["count"], 1);
        assert!(value["tags"][0].get("notes").is_none());
    }

    #[test]
    fn search_finds_note() {
        let (_dir, root) = sample_vault();
        let (stdout, _, code) = run_cli(&root, &["search", "nothing here"]);
        assert_eq!(code, 0);

        let value = json(&stdout);
        assert_eq!(value["total"], 1);
        assert_eq!(value["results"][0]["path"], "sub/C.md");
    }
}

mod setup_errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_vault_directory() {
        let dir = TempDir::new().unwrap();
        let (_, stderr, code) = run_cli(&dir.path().join("absent"), &["list"]);
        assert_eq!(code, 3);
        assert!(stderr.contains("absent"));
    }
}
