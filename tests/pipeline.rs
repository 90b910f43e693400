use std::{fs, path::PathBuf};

use cel_shading::prelude::*;
use crystal::prelude::*;

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.window.width = 160;
    config.window.height = 120;
    config
}

#[test]
fn test_sample_assets_load() {
    let sphere = obj::load(asset("sphere.obj")).expect("sphere");
    assert_eq!(sphere.vertices().len(), 266);
    assert_eq!(sphere.faces().len(), 528);
    assert_eq!(sphere.normals().len(), 266);

    let cube = obj::load(asset("cube.obj")).expect("cube");
    assert_eq!(cube.vertices().len(), 8);
    assert_eq!(cube.faces().len(), 12);
    assert_eq!(cube.face_normals().len(), 12);
    assert!(cube
        .faces()
        .iter()
        .all(|face| face.corners.iter().all(|corner| corner.normal.is_some())));
}

#[test]
fn test_sample_config_is_valid() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cel_shading.toml");
    let config = Config::load(&path).expect("sample config");

    assert_eq!(config.model, PathBuf::from("assets/sphere.obj"));
    assert_eq!(config.window.title, "Cel Shading");
    assert!(config.output.frames > 1);
}

#[test]
fn test_tetrahedron_frame_commands() {
    let mesh = obj::load(asset("tetrahedron.obj")).expect("tetrahedron");
    let renderer = Renderer::default();
    let mut ctx = RecordingContext::new(1);

    let stats = renderer
        .render_frame(&mut ctx, &mesh, &Camera::default())
        .expect("recording never fails");
    assert_eq!(stats.triangles, 4);
    assert_eq!(stats.outline_segments, 6);

    let commands = ctx.commands();
    assert_eq!(commands.len(), 1 + 1 + 1 + 4 + 1);
    assert!(matches!(commands[0], DrawCommand::Clear(_)));
    assert!(matches!(commands[1], DrawCommand::SetCamera { .. }));
    match &commands[2] {
        DrawCommand::Lines { segments, .. } => {
            let expected = renderer.detector.detect(&mesh, &Camera::default().position());
            assert_eq!(segments, &expected);
        }
        other => panic!("expected outline, got {:?}", other),
    }
    assert!(commands[3..7]
        .iter()
        .all(|command| matches!(command, DrawCommand::Triangle { .. })));
    assert_eq!(commands[7], DrawCommand::Present);
}

#[test]
fn test_tetrahedron_outline_is_deterministic() {
    let mesh = obj::load(asset("tetrahedron.obj")).expect("tetrahedron");
    let detector = SilhouetteDetector::default();
    let camera = Vec3::new(0.0, 0.0, 5.0);

    assert_eq!(detector.silhouette_faces(&mesh, &camera), vec![0, 3]);

    let first = detector.detect(&mesh, &camera);
    for _ in 0..5 {
        let mesh = obj::load(asset("tetrahedron.obj")).expect("tetrahedron");
        assert_eq!(detector.detect(&mesh, &camera), first);
    }
}

#[test]
fn test_cube_rasterizes_with_outline() {
    let config = small_config();
    let mesh = obj::load(asset("cube.obj")).expect("cube");
    let renderer = Renderer::from_config(&config);
    let camera = Camera::from_config(&config.camera, config.aspect());
    let mut ctx = SoftwareContext::from_config(&config).expect("context");

    renderer
        .render_frame(&mut ctx, &mesh, &camera)
        .expect("render");

    let image = ctx.image();
    let front = renderer
        .face_color(&mesh, 2, &camera)
        .expect("front face color")
        .to_rgba8();
    let clear = Color::WHITE.to_rgba8();
    let outline = Color::BLACK.to_rgba8();

    assert_eq!(image.get_pixel(80, 60).0, front);
    assert_eq!(image.get_pixel(0, 0).0, clear);
    assert_eq!(image.get_pixel(159, 119).0, clear);
    assert!(image.pixels().any(|p| p.0 == outline));
}

#[test]
fn test_game_loop_writes_frames() {
    let dir = std::env::temp_dir().join(format!("cel_shading_pipeline_{}", std::process::id()));
    let mut config = small_config();
    config.output.directory = Some(dir.clone());
    config.output.frames = 3;
    config.camera.orbit_deg_per_frame = 20.0;

    let mesh = obj::load(asset("sphere.obj")).expect("sphere");
    let renderer = Renderer::from_config(&config);
    let mut camera = Camera::from_config(&config.camera, config.aspect());
    let mut ctx = SoftwareContext::from_config(&config).expect("context");

    let frames = GameLoop::new(config.camera.orbit_deg_per_frame.deg())
        .run(&mut ctx, &renderer, &mesh, &mut camera)
        .expect("render loop");

    assert_eq!(frames, 3);
    for index in 0..3 {
        assert!(dir.join(format!("frame_{:04}.png", index)).is_file());
    }
    assert!(!dir.join("frame_0003.png").exists());

    fs::remove_dir_all(&dir).expect("cleanup");
}
