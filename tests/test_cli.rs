mod common;

use assert_cmd::Command;
use gyral_zones::write_curv;
use tempfile::tempdir;

#[test]
fn the_curvature_file_is_required() {
    Command::cargo_bin("gyral-zones").unwrap()
        .assert()
        .failure()
        .code(2);
}

#[test]
fn a_curvature_file_alone_produces_the_zone_files() {
    let dir = tempdir().unwrap();
    let curv = dir.path().join("lh.curv");
    write_curv(&curv, &[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();

    Command::cargo_bin("gyral-zones").unwrap()
        .arg("--curv").arg(&curv)
        .arg("--no_plots")
        .assert()
        .success();

    for suffix in ["gyral_crown", "sulcal_wall", "sulcal_fundi", "crown_wall_sulc"].iter() {
        assert!(dir.path().join(format!("lh.{}", suffix)).exists(), "missing lh.{}", suffix);
    }
}

#[test]
fn an_unknown_region_is_reported_and_fails() {
    let dir = tempdir().unwrap();
    let curv = dir.path().join("lh.curv");
    let annot = dir.path().join("lh.aparc.annot");
    write_curv(&curv, &[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
    common::write_annot(&annot, &["unknown", "cuneus"], &[0, 1, 1, 1, 0]);

    let output = Command::cargo_bin("gyral-zones").unwrap()
        .arg("-c").arg(&curv)
        .arg("-a").arg(&annot)
        .args(&["--rois", "cuneus,insula", "--no_plots"])
        .output()
        .unwrap();

    assert_eq!(Some(1), output.status.code());
    assert!(String::from_utf8_lossy(&output.stderr).contains("insula"));
    assert!(!dir.path().join("lh.gyral_crown").exists());
}
