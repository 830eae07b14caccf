//! Builders for small synthetic FreeSurfer files.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    push_i32(buf, s.len() as i32 + 1);
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
}

/// Color of the region with the given colortable index, distinct for every index.
fn region_rgb(idx: usize) -> [i32; 3] {
    [(idx as i32 * 20 + 5) % 256, (idx as i32 * 40 + 10) % 256, (idx as i32 * 7 + 60) % 256]
}

/// Write a version 2 annot file. `vertex_regions` holds a colortable index for every vertex.
pub fn write_annot(path: &Path, region_names: &[&str], vertex_regions: &[usize]) {
    let pack = |c: [i32; 3]| c[0] + c[1] * 256 + c[2] * 65536;

    let mut buf = Vec::new();
    push_i32(&mut buf, vertex_regions.len() as i32);
    for (idx, region) in vertex_regions.iter().enumerate() {
        push_i32(&mut buf, idx as i32);
        push_i32(&mut buf, pack(region_rgb(*region)));
    }
    push_i32(&mut buf, 1);
    push_i32(&mut buf, -2);
    push_i32(&mut buf, region_names.len() as i32);
    push_str(&mut buf, "aparc.annot.ctab");
    push_i32(&mut buf, region_names.len() as i32);
    for (idx, name) in region_names.iter().enumerate() {
        push_i32(&mut buf, idx as i32);
        push_str(&mut buf, name);
        for c in region_rgb(idx).iter() {
            push_i32(&mut buf, *c);
        }
        push_i32(&mut buf, 0);
    }
    fs::write(path, buf).unwrap();
}

/// Write a float MGH surface overlay of shape (n, 1, 1, 1).
pub fn write_mgh_overlay(path: &Path, values: &[f32]) {
    let mut buf: Vec<u8> = Vec::new();
    for v in [1, values.len() as i32, 1, 1, 1, 3, 0].iter() {
        push_i32(&mut buf, *v);
    }
    buf.extend_from_slice(&0i16.to_be_bytes());
    buf.resize(284, 0);
    for v in values.iter() {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    fs::write(path, buf).unwrap();
}
