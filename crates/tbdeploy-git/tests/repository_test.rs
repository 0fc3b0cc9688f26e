use std::path::Path;
use std::process::Command;
use tbdeploy_core::scan_commits;
use tbdeploy_git::GitRepository;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "tag.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "Test Author")
        .env("GIT_COMMITTER_EMAIL", "author@example.com")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn commit(dir: &Path, message: &str) {
    git(dir, &["commit", "-q", "--allow-empty", "-m", message]);
}

fn scratch_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);

    commit(dir.path(), "Initial import");
    git(dir.path(), &["tag", "2011.02.20.10.00"]);
    commit(dir.path(), "Old work\n\ntb #1");
    git(dir.path(), &["tag", "2011.02.23.16.44"]);
    commit(dir.path(), "Fix login redirect\n\nMore details here\n\ntb #237095\nTB #237099");
    commit(dir.path(), "Bump dependencies");
    commit(dir.path(), "Tidy templates\n\nRefs tb#12");

    dir
}

#[tokio::test]
async fn test_list_tags() {
    let dir = scratch_repo();
    let repo = GitRepository::open(dir.path());

    let tags = repo.list_tags().await.unwrap();

    assert_eq!(tags, vec!["2011.02.20.10.00", "2011.02.23.16.44"]);
}

#[tokio::test]
async fn test_scan_since_last_tag() {
    let dir = scratch_repo();
    let repo = GitRepository::open(dir.path());

    let scan = scan_commits(&repo, None, false).await.unwrap();

    assert_eq!(scan.tag, "2011.02.23.16.44");
    assert_eq!(scan.log.task_ids, vec![237095, 237099, 12]);
    assert_eq!(scan.log.untasked.len(), 1);
    assert!(scan.log.untasked[0].starts_with("Test Author: Bump dependencies (`"));
}

#[tokio::test]
async fn test_scan_from_explicit_tag() {
    let dir = scratch_repo();
    let repo = GitRepository::open(dir.path());

    let scan = scan_commits(&repo, Some("2011.02.20.10.00"), false).await.unwrap();

    assert_eq!(scan.log.task_ids, vec![1, 237095, 237099, 12]);
}

#[tokio::test]
async fn test_repository_without_tags() {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    commit(dir.path(), "Initial import");
    let repo = GitRepository::open(dir.path());

    let result = scan_commits(&repo, None, false).await;

    assert!(matches!(result, Err(tbdeploy_core::Error::NoTags)));
}
