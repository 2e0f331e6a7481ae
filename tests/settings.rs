use std::io::Write;

use yama::{Error, SmoothMeshInfo};

#[test]
fn settings_parse_from_json() {
    let info = SmoothMeshInfo::from_json(
        r#"{
            "map_width": 1024.0,
            "map_height": 768.0,
            "resolution": 16.0,
            "smooth_radius": 320.0,
            "blur_passes": 3,
            "blur_sigma": 4.0
        }"#,
    )
    .unwrap();

    assert_eq!(info.map_width, 1024.0);
    assert_eq!(info.map_height, 768.0);
    assert_eq!(info.resolution, 16.0);
    assert_eq!(info.smooth_radius, 320.0);
    assert_eq!(info.blur_passes, 3);
    assert_eq!(info.blur_sigma, 4.0);
}

#[test]
fn settings_round_trip_through_json() {
    let info = SmoothMeshInfo {
        map_width: 200.0,
        smooth_radius: 48.0,
        ..Default::default()
    };

    let text = serde_json::to_string(&info).unwrap();
    assert_eq!(SmoothMeshInfo::from_json(&text).unwrap(), info);
}

#[test]
fn settings_load_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "map_width": 256.0,
            "map_height": 256.0,
            "resolution": 8.0,
            "smooth_radius": 64.0,
            "blur_passes": 2,
            "blur_sigma": 5.0
        }}"#
    )
    .unwrap();

    let info = SmoothMeshInfo::load_from_file(file.path()).unwrap();
    assert_eq!(info.resolution, 8.0);
    assert_eq!(info.smooth_radius, 64.0);
}

#[test]
fn malformed_settings_are_reported() {
    assert!(matches!(
        SmoothMeshInfo::from_json("{ not json"),
        Err(Error::SettingsError(_))
    ));
    assert!(matches!(
        SmoothMeshInfo::load_from_file("/definitely/not/here.json"),
        Err(Error::SettingsError(_))
    ));
}
