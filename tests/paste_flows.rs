use std::fs;
use tempfile::tempdir;
use treefm::core::{Error, RefreshSignal, TransferMode, TransferOrchestrator};

fn orchestrator() -> TransferOrchestrator {
    TransferOrchestrator::new(RefreshSignal::new())
}

#[tokio::test]
async fn test_paste_with_empty_clipboard_is_a_noop() {
    let temp = tempdir().unwrap();
    let mut orch = orchestrator();

    let result = orch.paste_into(temp.path()).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_copy_paste_duplicates_a_tree() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("proj");
    let target = temp.path().join("backup");
    fs::create_dir_all(source.join("src")).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(source.join("readme.md"), b"hello").unwrap();
    fs::write(source.join("src/lib.rs"), b"pub fn x() {}").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&source);
    let dest = orch.paste_into(&target).await.unwrap().unwrap();

    assert_eq!(dest, target.join("proj"));
    assert_eq!(fs::read(dest.join("readme.md")).unwrap(), b"hello");
    assert_eq!(fs::read(dest.join("src/lib.rs")).unwrap(), b"pub fn x() {}");

    // Source is untouched and the clipboard is spent.
    assert!(source.join("src/lib.rs").exists());
    assert!(orch.clipboard().is_none());
}

#[tokio::test]
async fn test_file_paste_conflict_resolves_to_copy2() {
    let temp = tempdir().unwrap();
    let elsewhere = temp.path().join("elsewhere");
    let target = temp.path().join("target");
    fs::create_dir(&elsewhere).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(elsewhere.join("a.txt"), b"incoming").unwrap();
    fs::write(target.join("a.txt"), b"old").unwrap();
    fs::write(target.join("a_copy.txt"), b"older").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&elsewhere.join("a.txt"));
    let dest = orch.paste_into(&target).await.unwrap().unwrap();

    assert_eq!(dest, target.join("a_copy2.txt"));
    assert_eq!(fs::read(&dest).unwrap(), b"incoming");
    assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"old");
}

#[tokio::test]
async fn test_directory_paste_conflict_resolves_to_copy2() {
    let temp = tempdir().unwrap();
    let elsewhere = temp.path().join("elsewhere");
    let target = temp.path().join("target");
    fs::create_dir_all(elsewhere.join("docs")).unwrap();
    fs::write(elsewhere.join("docs/guide.md"), b"guide").unwrap();
    fs::create_dir_all(target.join("docs")).unwrap();
    fs::create_dir_all(target.join("docs_copy")).unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&elsewhere.join("docs"));
    let dest = orch.paste_into(&target).await.unwrap().unwrap();

    assert_eq!(dest, target.join("docs_copy2"));
    assert_eq!(fs::read(dest.join("guide.md")).unwrap(), b"guide");
}

#[tokio::test]
async fn test_cut_paste_moves_without_leaving_a_copy() {
    let temp = tempdir().unwrap();
    let sub = temp.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let source = temp.path().join("x.txt");
    fs::write(&source, b"payload").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_cut(&source);
    let dest = orch.paste_into(&sub).await.unwrap().unwrap();

    assert_eq!(dest, sub.join("x.txt"));
    assert!(!source.exists());
    assert_eq!(fs::read(&dest).unwrap(), b"payload");
    assert!(orch.clipboard().is_none());
}

#[tokio::test]
async fn test_self_nested_paste_is_rejected_and_source_unmoved() {
    let temp = tempdir().unwrap();
    let foo = temp.path().join("foo");
    let bar = foo.join("bar");
    fs::create_dir_all(&bar).unwrap();
    fs::write(foo.join("keep.txt"), b"keep").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_cut(&foo);
    let err = orch.paste_into(&bar).await.unwrap_err();

    assert!(matches!(err, Error::SelfNestedPaste { .. }));
    assert!(foo.join("keep.txt").exists());
    assert!(fs::read_dir(&bar).unwrap().next().is_none());

    // The clipboard survives the rejection.
    let held = orch.clipboard().unwrap();
    assert_eq!(held.source, foo);
    assert_eq!(held.mode, TransferMode::Cut);
}

#[tokio::test]
async fn test_copy_paste_into_own_subtree_is_rejected_too() {
    let temp = tempdir().unwrap();
    let foo = temp.path().join("foo");
    fs::create_dir(&foo).unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&foo);
    let err = orch.paste_into(&foo).await.unwrap_err();

    assert!(matches!(err, Error::SelfNestedPaste { .. }));
}

#[tokio::test]
async fn test_failed_paste_keeps_the_clipboard() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("target");
    fs::create_dir(&target).unwrap();
    let source = temp.path().join("ghost.txt");
    fs::write(&source, b"x").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&source);

    // Source vanishes between mark and paste.
    fs::remove_file(&source).unwrap();
    let err = orch.paste_into(&target).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let held = orch.clipboard().unwrap();
    assert_eq!(held.source, source);
    assert_eq!(held.mode, TransferMode::Copy);
}

#[tokio::test]
async fn test_double_paste_after_cut_fails_with_not_found() {
    let temp = tempdir().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    let source = temp.path().join("x.txt");
    fs::write(&source, b"x").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_cut(&source);
    orch.paste_into(&a).await.unwrap().unwrap();

    // Re-marking the now-moved original path and pasting again fails.
    orch.mark_for_cut(&source);
    let err = orch.paste_into(&b).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_marking_replaces_the_held_entry() {
    let temp = tempdir().unwrap();
    let first = temp.path().join("first.txt");
    let second = temp.path().join("second.txt");
    fs::write(&first, b"1").unwrap();
    fs::write(&second, b"2").unwrap();

    let mut orch = orchestrator();
    orch.mark_for_copy(&first);
    orch.mark_for_cut(&second);

    let held = orch.clipboard().unwrap();
    assert_eq!(held.source, second);
    assert_eq!(held.mode, TransferMode::Cut);
}

#[tokio::test]
async fn test_repasting_a_source_builds_the_suffix_chain() {
    let temp = tempdir().unwrap();
    let elsewhere = temp.path().join("elsewhere");
    let target = temp.path().join("target");
    fs::create_dir(&elsewhere).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(elsewhere.join("a.txt"), b"x").unwrap();

    let mut orch = orchestrator();
    let mut names = Vec::new();
    for _ in 0..3 {
        orch.mark_for_copy(&elsewhere.join("a.txt"));
        let dest = orch.paste_into(&target).await.unwrap().unwrap();
        names.push(dest.file_name().unwrap().to_string_lossy().into_owned());
    }

    assert_eq!(names, vec!["a.txt", "a_copy.txt", "a_copy2.txt"]);
}

#[tokio::test]
async fn test_refresh_fires_after_a_successful_paste() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("target");
    fs::create_dir(&target).unwrap();
    let source = temp.path().join("a.txt");
    fs::write(&source, b"x").unwrap();

    let refresh = RefreshSignal::new();
    let mut rx = refresh.subscribe();
    let mut orch = TransferOrchestrator::new(refresh);

    orch.mark_for_copy(&source);
    orch.paste_into(&target).await.unwrap().unwrap();

    assert!(rx.try_recv().is_ok());
}
