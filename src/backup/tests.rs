// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::layout::{
    ARCHIVE_FILE, INFO_FILE, ISSUES_DIR, MIRROR_DIR, comments_file, create_fresh_dir, issue_file,
    partial_path, write_pretty_json,
};
use super::{
    Archiver, BackupOptions, BackupSummary, GitMirror, IssueExporter, Mirror, Orchestrator,
    RepositoryBackup, RepositoryLayout, TarXzArchiver, archive_into_place,
};
use crate::api::ApiClient;
use crate::auth::Credentials;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BackupError, FsError, ProcessError, Result};
use crate::model::Repository;

// --- Fakes ---

#[derive(Default)]
struct FakeMirror {
    calls: Mutex<Vec<(String, PathBuf)>>,
    fail: bool,
}

impl FakeMirror {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Mirror for FakeMirror {
    fn name(&self) -> &str {
        "fake-git"
    }

    fn mirror<'a>(&'a self, clone_url: &'a str, target: &'a Path) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((clone_url.to_string(), target.to_path_buf()));
            if self.fail {
                anyhow::bail!("remote hung up unexpectedly");
            }
            tokio::fs::create_dir(target).await?;
            tokio::fs::write(target.join("HEAD"), "ref: refs/heads/main\n").await?;
            Ok::<(), anyhow::Error>(())
        })
    }
}

#[derive(Default)]
struct FakeArchiver {
    fail: bool,
}

impl Archiver for FakeArchiver {
    fn name(&self) -> &str {
        "fake-tar"
    }

    fn archive<'a>(
        &'a self,
        base_dir: &'a Path,
        entry: &'a str,
        archive: &'a Path,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            assert!(base_dir.join(entry).is_dir());
            // Leave a half-written file behind, like a real archiver would
            tokio::fs::write(archive, b"\xfd7zXZ").await?;
            if self.fail {
                anyhow::bail!("no space left on device");
            }
            Ok::<(), anyhow::Error>(())
        })
    }
}

fn repo(full_name: &str, private: bool) -> Value {
    json!({
        "full_name": full_name,
        "clone_url": format!("https://github.com/{full_name}.git"),
        "private": private,
        "description": "test repository"
    })
}

fn offline_client() -> ApiClient {
    ApiClient::new("http://127.0.0.1:9", Credentials::new("alice", "t0k"), None).unwrap()
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Credentials::new("alice", "t0k"), None).unwrap()
}

async fn mount_repositories(server: &MockServer, repos: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos))
        .expect(1)
        .mount(server)
        .await;
}

// --- Layout ---

#[test]
fn test_layout_derivation() {
    let repository = Repository::new(repo("alice/project-x", false));
    let layout = RepositoryLayout::for_repository(Path::new("/backups"), &repository).unwrap();

    assert_eq!(layout.root(), Path::new("/backups/alice/project-x"));
    assert_eq!(
        layout.info_file(),
        Path::new("/backups/alice/project-x/repository-info.json")
    );
    assert_eq!(
        layout.mirror_dir(),
        Path::new("/backups/alice/project-x/repository")
    );
    assert_eq!(
        layout.archive_file(),
        Path::new("/backups/alice/project-x/repository.tar.xz")
    );
    assert_eq!(
        issue_file(&layout.issues_dir(), 42),
        Path::new("/backups/alice/project-x/issues/42.json")
    );
    assert_eq!(
        comments_file(&layout.issues_dir(), 42),
        Path::new("/backups/alice/project-x/issues/42.comments.json")
    );
    assert_eq!(
        partial_path(&layout.archive_file()),
        Path::new("/backups/alice/project-x/repository.tar.xz.partial")
    );
}

#[test]
fn test_layout_rejects_traversal() {
    let repository = Repository::new(repo("../etc", false));
    assert!(RepositoryLayout::for_repository(Path::new("/backups"), &repository).is_err());
}

#[tokio::test]
async fn test_create_fresh_dir_refuses_existing() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("a").join("b");

    create_fresh_dir(&target).await.unwrap();
    assert!(target.is_dir());

    let err = create_fresh_dir(&target).await.unwrap_err();
    assert!(matches!(
        err,
        BackupError::Fs(ref boxed) if matches!(**boxed, FsError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn test_write_pretty_json() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("out.json");

    write_pretty_json(&file, &json!({ "a": [1] })).await.unwrap();
    let text = std::fs::read_to_string(&file).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r#"
    {
      "a": [
        1
      ]
    }
    "#);
    assert!(text.ends_with("}\n"));
}

// --- Archive ---

#[tokio::test]
async fn test_archive_into_place_failure_leaves_nothing() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join(MIRROR_DIR)).unwrap();
    let archive = temp.path().join(ARCHIVE_FILE);

    let result = archive_into_place(
        &FakeArchiver { fail: true },
        temp.path(),
        MIRROR_DIR,
        &archive,
    )
    .await;

    assert!(result.is_err());
    assert!(!archive.exists());
    assert!(!partial_path(&archive).exists());
    assert!(temp.path().join(MIRROR_DIR).is_dir());
}

#[tokio::test]
async fn test_archive_into_place_tolerates_unremovable_partial() {
    struct DirArchiver;

    impl Archiver for DirArchiver {
        fn name(&self) -> &str {
            "dir"
        }

        fn archive<'a>(
            &'a self,
            _base_dir: &'a Path,
            _entry: &'a str,
            archive: &'a Path,
        ) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                // A directory cannot be removed with remove_file
                tokio::fs::create_dir(archive).await?;
                Err::<(), anyhow::Error>(anyhow::anyhow!("interrupted"))
            })
        }
    }

    let temp = tempfile::tempdir().unwrap();
    let archive = temp.path().join(ARCHIVE_FILE);

    let err = archive_into_place(&DirArchiver, temp.path(), MIRROR_DIR, &archive)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("interrupted"));
    assert!(partial_path(&archive).is_dir());
    assert!(!archive.exists());
}

#[tokio::test]
async fn test_tar_archiver_real() {
    if !ProcessBuilder::exists("tar") || !ProcessBuilder::exists("xz") {
        eprintln!("tar or xz not found, skipping");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let mirror = temp.path().join(MIRROR_DIR);
    std::fs::create_dir(&mirror).unwrap();
    std::fs::write(mirror.join("HEAD"), "ref: refs/heads/main\n").unwrap();
    let archive = temp.path().join(ARCHIVE_FILE);

    archive_into_place(&TarXzArchiver::default(), temp.path(), MIRROR_DIR, &archive)
        .await
        .unwrap();
    assert!(archive.is_file());

    let listing = ProcessBuilder::new("tar")
        .arg("-tJf")
        .arg(&archive)
        .capture_stdout()
        .run()
        .await
        .unwrap();
    assert!(listing.stdout().lines().all(|l| l.starts_with("repository")));
    assert!(listing.stdout().contains("repository/HEAD"));
}

#[tokio::test]
async fn test_git_mirror_real() {
    if !ProcessBuilder::exists("git") {
        eprintln!("git not found, skipping");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("source.git");
    ProcessBuilder::new("git")
        .args(["init", "--bare", "--quiet"])
        .arg(&source)
        .run()
        .await
        .unwrap();

    let target = temp.path().join(MIRROR_DIR);
    let source_url = source.to_string_lossy().into_owned();
    GitMirror::default()
        .mirror(&source_url, &target)
        .await
        .unwrap();
    assert!(target.join("HEAD").is_file());

    let missing = temp.path().join("missing.git").to_string_lossy().into_owned();
    let err = GitMirror::default()
        .mirror(&missing, &temp.path().join("other"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Process(boxed)) if matches!(**boxed, ProcessError::NonZeroExit { .. })
    ));
}

#[tokio::test]
async fn test_missing_tools_are_reported_by_name() {
    let temp = tempfile::tempdir().unwrap();

    let err = GitMirror::new("definitely-not-a-real-git")
        .mirror("https://github.com/alice/x.git", &temp.path().join(MIRROR_DIR))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Process(boxed))
            if matches!(**boxed, ProcessError::ExecutableNotFound { ref name } if name.ends_with("git"))
    ));
    assert!(!temp.path().join(MIRROR_DIR).exists());

    std::fs::create_dir(temp.path().join(MIRROR_DIR)).unwrap();
    let archive = temp.path().join(ARCHIVE_FILE);
    let err = archive_into_place(
        &TarXzArchiver::new("definitely-not-a-real-tar"),
        temp.path(),
        MIRROR_DIR,
        &archive,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Process(boxed))
            if matches!(**boxed, ProcessError::ExecutableNotFound { .. })
    ));
    assert!(!partial_path(&archive).exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_pipeline_keeps_non_utf8_destination() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    if !ProcessBuilder::exists("git")
        || !ProcessBuilder::exists("tar")
        || !ProcessBuilder::exists("xz")
    {
        eprintln!("git, tar or xz not found, skipping");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("origin.git");
    ProcessBuilder::new("git")
        .args(["init", "--bare", "--quiet"])
        .arg(&source)
        .run()
        .await
        .unwrap();

    let dest = temp.path().join(OsStr::from_bytes(b"backup-\xff"));
    let record = json!({
        "full_name": "alice/project-x",
        "clone_url": source.to_string_lossy(),
        "private": false
    });
    let client = offline_client();
    let mirror = GitMirror::default();
    let archiver = TarXzArchiver::default();

    let root = RepositoryBackup::new(&client, &mirror, &archiver, BackupOptions::default())
        .run(&dest, &Repository::new(record.clone()))
        .await
        .unwrap();
    assert!(root.starts_with(&dest));
    assert!(root.join(INFO_FILE).is_file());
    assert!(root.join(MIRROR_DIR).join("HEAD").is_file());

    let archived_dest = temp.path().join(OsStr::from_bytes(b"archived-\xff"));
    let options = BackupOptions {
        compress: true,
        include_issues: false,
    };
    let root = RepositoryBackup::new(&client, &mirror, &archiver, options)
        .run(&archived_dest, &Repository::new(record))
        .await
        .unwrap();
    assert!(root.join(ARCHIVE_FILE).is_file());
    assert!(!root.join(MIRROR_DIR).exists());

    // Nothing was written under a lossily renamed sibling
    let mut entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    entries.sort();
    let mut expected = vec![
        OsStr::from_bytes(b"archived-\xff").to_os_string(),
        OsStr::from_bytes(b"backup-\xff").to_os_string(),
        "origin.git".into(),
    ];
    expected.sort();
    assert_eq!(entries, expected);
}

// --- Pipeline ---

#[tokio::test]
async fn test_pipeline_writes_metadata_and_mirror() {
    let temp = tempfile::tempdir().unwrap();
    let client = offline_client();
    let mirror = FakeMirror::default();
    let archiver = FakeArchiver::default();
    let record = repo("alice/project-x", false);
    let repository = Repository::new(record.clone());

    let pipeline = RepositoryBackup::new(&client, &mirror, &archiver, BackupOptions::default());
    let root = pipeline.run(temp.path(), &repository).await.unwrap();

    assert_eq!(root, temp.path().join("alice").join("project-x"));
    let info = std::fs::read_to_string(root.join(INFO_FILE)).unwrap();
    assert!(info.ends_with('\n'));
    assert_eq!(serde_json::from_str::<Value>(&info).unwrap(), record);
    assert!(root.join(MIRROR_DIR).join("HEAD").is_file());
    assert!(!root.join(ARCHIVE_FILE).exists());
    assert!(!root.join(ISSUES_DIR).exists());

    let calls = mirror.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "https://github.com/alice/project-x.git");
    assert_eq!(calls[0].1, root.join(MIRROR_DIR));
}

#[tokio::test]
async fn test_pipeline_compress_replaces_mirror() {
    let temp = tempfile::tempdir().unwrap();
    let client = offline_client();
    let mirror = FakeMirror::default();
    let archiver = FakeArchiver::default();
    let options = BackupOptions {
        compress: true,
        include_issues: false,
    };

    let root = RepositoryBackup::new(&client, &mirror, &archiver, options)
        .run(temp.path(), &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap();

    assert!(root.join(ARCHIVE_FILE).is_file());
    assert!(!partial_path(&root.join(ARCHIVE_FILE)).exists());
    assert!(!root.join(MIRROR_DIR).exists());
    assert!(root.join(INFO_FILE).is_file());
}

#[tokio::test]
async fn test_pipeline_archive_failure_keeps_mirror() {
    let temp = tempfile::tempdir().unwrap();
    let client = offline_client();
    let mirror = FakeMirror::default();
    let archiver = FakeArchiver { fail: true };
    let options = BackupOptions {
        compress: true,
        include_issues: false,
    };

    let err = RepositoryBackup::new(&client, &mirror, &archiver, options)
        .run(temp.path(), &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap_err();

    let root = temp.path().join("alice").join("project-x");
    assert!(format!("{err:#}").contains("no space left on device"));
    assert!(root.join(MIRROR_DIR).join("HEAD").is_file());
    assert!(!root.join(ARCHIVE_FILE).exists());
    assert!(!partial_path(&root.join(ARCHIVE_FILE)).exists());
}

#[tokio::test]
async fn test_pipeline_refuses_existing_repository_dir() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("alice").join("project-x")).unwrap();
    let client = offline_client();
    let mirror = FakeMirror::default();
    let archiver = FakeArchiver::default();

    let err = RepositoryBackup::new(&client, &mirror, &archiver, BackupOptions::default())
        .run(temp.path(), &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Fs(boxed)) if matches!(**boxed, FsError::AlreadyExists(_))
    ));
    assert!(mirror.calls().is_empty());
}

#[tokio::test]
async fn test_pipeline_mirror_failure_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let client = offline_client();
    let mirror = FakeMirror::failing();
    let archiver = FakeArchiver::default();

    let err = RepositoryBackup::new(&client, &mirror, &archiver, BackupOptions::default())
        .run(temp.path(), &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("fake-git failed to mirror alice/project-x"));
    assert!(message.contains("remote hung up unexpectedly"));
    // Metadata written before the failure stays
    assert!(
        temp.path()
            .join("alice/project-x")
            .join(INFO_FILE)
            .is_file()
    );
}

// --- Issues ---

async fn mount_issues(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/repos/alice/project-x/issues"))
        .and(query_param("state", "all"))
        .and(query_param("direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 7,
                "title": "first",
                "url": format!("{base}/repos/alice/project-x/issues/7"),
                "comments_url": format!("{base}/repos/alice/project-x/issues/7/comments")
            },
            {
                "number": 42,
                "title": "second",
                "url": format!("{base}/repos/alice/project-x/issues/42"),
                "comments_url": format!("{base}/repos/alice/project-x/issues/42/comments")
            }
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/project-x/issues/7/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(server)
        .await;

    // Second comment page; higher priority than the unqualified first page
    Mock::given(method("GET"))
        .and(path("/repos/alice/project-x/issues/42/comments"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 3 }])))
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;

    let link = format!("<{base}/repos/alice/project-x/issues/42/comments?page=2>; rel=\"next\"");
    Mock::given(method("GET"))
        .and(path("/repos/alice/project-x/issues/42/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }, { "id": 2 }]))
                .insert_header("link", link.as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_issue_export_pairs_comments_across_pages() {
    let server = MockServer::start().await;
    mount_issues(&server).await;
    let temp = tempfile::tempdir().unwrap();
    let issues_dir = temp.path().join(ISSUES_DIR);
    let client = client_for(&server);

    let exported = IssueExporter::new(&client)
        .export(&issues_dir, &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap();
    assert_eq!(exported, 2);

    let issue: Value =
        serde_json::from_str(&std::fs::read_to_string(issue_file(&issues_dir, 42)).unwrap())
            .unwrap();
    assert_eq!(issue["title"], "second");
    assert!(issue["url"].as_str().unwrap().ends_with("/issues/42"));

    let comments: Value =
        serde_json::from_str(&std::fs::read_to_string(comments_file(&issues_dir, 42)).unwrap())
            .unwrap();
    assert_eq!(comments, json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]));

    let empty = std::fs::read_to_string(comments_file(&issues_dir, 7)).unwrap();
    assert_eq!(empty, "[]\n");
}

#[tokio::test]
async fn test_issue_export_aborts_on_comment_failure() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/repos/alice/project-x/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "number": 1, "comments_url": format!("{base}/c/1") },
            { "number": 2, "comments_url": format!("{base}/c/2") }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let issues_dir = temp.path().join(ISSUES_DIR);
    let client = client_for(&server);

    let err = IssueExporter::new(&client)
        .export(&issues_dir, &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("alice/project-x#1"));
    assert!(!issue_file(&issues_dir, 1).exists());
}

#[tokio::test]
async fn test_pipeline_with_issues() {
    let server = MockServer::start().await;
    mount_issues(&server).await;
    let temp = tempfile::tempdir().unwrap();
    let client = client_for(&server);
    let mirror = FakeMirror::default();
    let archiver = FakeArchiver::default();
    let options = BackupOptions {
        compress: false,
        include_issues: true,
    };

    let root = RepositoryBackup::new(&client, &mirror, &archiver, options)
        .run(temp.path(), &Repository::new(repo("alice/project-x", false)))
        .await
        .unwrap();

    assert!(issue_file(&root.join(ISSUES_DIR), 7).is_file());
    assert!(comments_file(&root.join(ISSUES_DIR), 42).is_file());
}

// --- Orchestrator ---

fn orchestrator(client: ApiClient, mirror: FakeMirror) -> Orchestrator {
    Orchestrator::builder()
        .client(client)
        .mirror(Box::new(mirror))
        .archiver(Box::new(FakeArchiver::default()))
        .build()
}

#[tokio::test]
async fn test_orchestrator_skips_private_repositories() {
    let server = MockServer::start().await;
    mount_repositories(
        &server,
        vec![repo("alice/public", false), repo("alice/secret", true)],
    )
    .await;

    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("backup");
    let summary = orchestrator(client_for(&server), FakeMirror::default())
        .run(&dest)
        .await
        .unwrap();

    assert_eq!(
        summary,
        BackupSummary {
            backed_up: 1,
            skipped: 1
        }
    );
    assert!(dest.join("alice/public").join(INFO_FILE).is_file());
    assert!(!dest.join("alice/secret").exists());
}

#[tokio::test]
async fn test_orchestrator_includes_private_when_asked() {
    let server = MockServer::start().await;
    mount_repositories(
        &server,
        vec![repo("alice/public", false), repo("alice/secret", true)],
    )
    .await;

    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("backup");
    let summary = Orchestrator::builder()
        .client(client_for(&server))
        .mirror(Box::new(FakeMirror::default()))
        .archiver(Box::new(FakeArchiver::default()))
        .skip_private(false)
        .build()
        .run(&dest)
        .await
        .unwrap();

    assert_eq!(summary.backed_up, 2);
    assert!(dest.join("alice/secret").join(MIRROR_DIR).is_dir());
}

#[tokio::test]
async fn test_orchestrator_refuses_existing_root_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let err = orchestrator(client_for(&server), FakeMirror::default())
        .run(temp.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Fs(boxed)) if matches!(**boxed, FsError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn test_orchestrator_aborts_on_first_failure() {
    let server = MockServer::start().await;
    mount_repositories(
        &server,
        vec![repo("alice/one", false), repo("alice/two", false)],
    )
    .await;

    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("backup");
    let orchestrator = orchestrator(client_for(&server), FakeMirror::failing());
    let err = orchestrator.run(&dest).await.unwrap_err();

    assert!(format!("{err:#}").contains("failed to back up alice/one"));
    assert!(!dest.join("alice/two").exists());
}

#[tokio::test]
async fn test_orchestrator_dry_run_touches_nothing() {
    let server = MockServer::start().await;
    mount_repositories(&server, vec![repo("alice/public", false)]).await;

    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("backup");
    let summary = Orchestrator::builder()
        .client(client_for(&server))
        .mirror(Box::new(FakeMirror::failing()))
        .archiver(Box::new(FakeArchiver { fail: true }))
        .dry_run(true)
        .build()
        .run(&dest)
        .await
        .unwrap();

    assert_eq!(summary.backed_up, 1);
    assert!(!dest.exists());
}
