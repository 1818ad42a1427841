use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_font").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_chain_resolves_to_builtin() {
    let mut resolver = FontResolver::new(Vec::new());
    let font = resolver.resolve(40.0);
    assert!(font.is_builtin());
    assert!(font.source.is_none());
    assert_eq!(font.size_px, 40.0);
    assert!(matches!(font.face, FontFace::Builtin(b) if b.scale() == 5));
}

#[test]
fn missing_files_fall_through_to_builtin() {
    let mut resolver = FontResolver::new(vec![
        FontSource::File {
            path: PathBuf::from("/definitely/not/here.ttf"),
        },
        FontSource::File {
            path: PathBuf::from("also-missing.otf"),
        },
    ]);
    let font = resolver.resolve(30.0);
    assert!(font.is_builtin());
    assert_eq!(font.family(), "builtin 5x7 bitmap");
}

#[test]
fn garbage_font_file_is_rejected() {
    let dir = scratch_dir("garbage");
    let path = dir.join("not-a-font.ttf");
    std::fs::write(&path, b"this is not a font").unwrap();

    let mut resolver = FontResolver::new(vec![FontSource::File { path }]);
    assert!(resolver.resolve(24.0).is_builtin());
    assert!(face_from_bytes(b"garbage".to_vec()).is_err());
}

#[test]
fn unknown_system_family_falls_through() {
    let mut resolver = FontResolver::new(vec![FontSource::System {
        family: "No Such Family 7f3a".to_string(),
    }]);
    assert!(resolver.resolve(24.0).is_builtin());
}

#[test]
fn repeated_resolution_is_stable() {
    let mut resolver = FontResolver::new(FontSource::default_chain());
    let a = resolver.resolve(40.0);
    let b = resolver.resolve(40.0);
    let c = resolver.resolve(24.0);
    assert_eq!(a.source, b.source);
    assert_eq!(a.source, c.source);
    assert_eq!(a.family(), c.family());
    assert_eq!(c.size_px, 24.0);
}

#[test]
fn source_display_and_json_shape() {
    let src = FontSource::File {
        path: PathBuf::from("/fonts/a.ttf"),
    };
    assert_eq!(src.to_string(), "file '/fonts/a.ttf'");
    assert_eq!(
        serde_json::to_value(&src).unwrap(),
        serde_json::json!({ "kind": "file", "path": "/fonts/a.ttf" })
    );

    let sys = FontSource::System {
        family: "sans-serif".to_string(),
    };
    assert_eq!(sys.to_string(), "system family 'sans-serif'");
}
