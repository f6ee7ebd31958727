//! End-to-end refreshes of a mirrored device tree.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use devmirror_core::{
    deliver, full_path, listing_command, Config, CoreError, Entry, EntryRef, EntrySnapshot,
    EntryType, Reconciler, RootFilter,
};

fn lines(raw: &str) -> Vec<String> {
    raw.lines().map(str::to_string).collect()
}

fn refresh(dir: &EntryRef, filter: &RootFilter, batches: Vec<Vec<String>>) -> Vec<EntryRef> {
    let mut reconciler = Reconciler::new(dir, filter);
    deliver(&mut reconciler, batches).unwrap();
    reconciler.finish().apply()
}

const ROOT_LISTING: &str = "\
drwxr-xr-x root root 0 2023-01-01 00:00 acct
drwxrwx--x system cache 4096 2023-01-01 00:00 cache
drwxrwx--x system system 4096 2023-01-01 00:00 data
lrwxrwxrwx root root 21 2023-01-01 00:00 sdcard -> /storage/self/primary
drwxr-xr-x root root 4096 2023-01-01 00:00 system
dr-xr-xr-x root root 0 2023-01-01 00:00 proc";

#[test]
fn root_refresh_uses_configured_allow_list() {
    let root = Entry::new_root();
    let filter = RootFilter::from_config(&Config::default().listing);

    refresh(&root, &filter, vec![lines(ROOT_LISTING)]);

    let children = root.borrow().children();
    let names: Vec<String> = children
        .iter()
        .map(|c| c.borrow().name().to_string())
        .collect();
    assert_eq!(names, vec!["data", "sdcard", "system"]);

    let sdcard = root.borrow().find_child("sdcard").unwrap();
    assert_eq!(sdcard.borrow().entry_type(), EntryType::Link);
    assert_eq!(sdcard.borrow().link_info(), Some("-> /storage/self/primary"));
}

#[test]
fn nested_refresh_keeps_handles_across_batches() {
    let root = Entry::new_root();
    let filter = RootFilter::new(["sdcard"]);
    refresh(
        &root,
        &filter,
        vec![lines("drwxrwx--x root sdcard_rw 0 2023-01-01 00:00 sdcard")],
    );
    let sdcard = root.borrow().find_child("sdcard").unwrap();
    assert_eq!(listing_command(&sdcard), "ls -l /sdcard/");

    refresh(
        &sdcard,
        &filter,
        vec![
            lines("total 16\ndrwxrwx--x root sdcard_rw 0 2023-01-01 00:00 DCIM"),
            lines("-rw-rw---- root sdcard_rw 10 2023-01-01 00:00 todo.txt"),
        ],
    );
    let dcim = sdcard.borrow().find_child("DCIM").unwrap();
    assert_eq!(full_path(&dcim), "/sdcard/DCIM");

    let removed = refresh(
        &sdcard,
        &filter,
        vec![lines(
            "drwxrwx--x root sdcard_rw 0 2023-01-02 08:00 DCIM\n\
             -rw-rw---- root sdcard_rw 20 2023-01-02 08:00 done.txt",
        )],
    );

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].borrow().name(), "todo.txt");
    assert!(Rc::ptr_eq(&sdcard.borrow().find_child("DCIM").unwrap(), &dcim));
    assert_eq!(dcim.borrow().date(), "2023-01-02");
    assert_eq!(sdcard.borrow().child_count(), 2);
}

#[test]
fn cancelled_refresh_keeps_processed_lines() {
    let root = Entry::new_root();
    let filter = RootFilter::default();
    let dir = Entry::add_child(&root, "data", EntryType::Directory).unwrap();
    let cancel = Arc::new(AtomicBool::new(false));

    let mut reconciler = Reconciler::new(&dir, &filter).with_cancel_flag(Arc::clone(&cancel));
    let batches = vec![
        lines("-rw------- system system 1 2023-01-01 00:00 first"),
        lines("-rw------- system system 1 2023-01-01 00:00 second"),
    ];

    cancel.store(true, Ordering::Relaxed);
    let result = deliver(&mut reconciler, batches);
    assert!(matches!(result.unwrap_err(), CoreError::Cancelled));
    assert_eq!(reconciler.entries().len(), 1);
}

#[test]
fn snapshot_reflects_mirrored_tree() {
    let root = Entry::new_root();
    let filter = RootFilter::new(["system"]);
    refresh(
        &root,
        &filter,
        vec![lines("drwxr-xr-x root root 0 2023-01-01 00:00 system")],
    );
    let system = root.borrow().find_child("system").unwrap();
    refresh(
        &system,
        &filter,
        vec![lines(
            "lrwxrwxrwx root root 2 2023-01-01 00:00 up -> ..\n\
             -rw-r--r-- root root 1024 2023-01-01 00:00 build.prop",
        )],
    );

    let snapshot = EntrySnapshot::capture(&root);
    let system = &snapshot.children[0];
    assert_eq!(system.name, "system");
    assert_eq!(system.children[0].entry_type, EntryType::DirectoryLink);
    assert_eq!(system.children[1].size, 1024);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["children"][0]["children"][1]["name"], "build.prop");
}
