use chrono::{Local, TimeDelta};
use tickgif::{GenerationRequest, generate_into, load_default_font};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "tickgif_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn gif_frame_count(path: &std::path::Path) -> usize {
    let file = std::fs::File::open(path).unwrap();
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(file).unwrap();
    let mut count = 0;
    while decoder.read_next_frame().unwrap().is_some() {
        count += 1;
    }
    count
}

fn future_request(name: &str, frames: u32) -> GenerationRequest {
    let target = (Local::now() + TimeDelta::seconds(300))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let mut req = GenerationRequest::new(target);
    req.width = 300;
    req.height = 150;
    req.name = name.to_string();
    req.frames = frames;
    req
}

#[test]
fn writes_a_looping_gif_with_one_frame_per_second() {
    // All end-to-end tests need a system font; skip quietly when none is
    // available on the host.
    if load_default_font().is_err() {
        return;
    }

    let dir = temp_dir("e2e_active");
    let path = generate_into(&future_request("countdown", 3), Local::now(), &dir).unwrap();

    assert_eq!(path, dir.join("countdown.gif"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(gif_frame_count(&path), 3);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn expired_target_yields_a_single_frame_gif() {
    if load_default_font().is_err() {
        return;
    }

    let target = (Local::now() - TimeDelta::seconds(1))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let mut req = GenerationRequest::new(target);
    req.width = 300;
    req.height = 150;
    req.name = "expired".to_string();
    req.frames = 30;

    let dir = temp_dir("e2e_expired");
    let path = generate_into(&req, Local::now(), &dir).unwrap();
    assert_eq!(gif_frame_count(&path), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn requests_with_distinct_names_write_distinct_files() {
    if load_default_font().is_err() {
        return;
    }

    let dir = temp_dir("e2e_names");
    let a = generate_into(&future_request("first", 1), Local::now(), &dir).unwrap();
    let b = generate_into(&future_request("second", 1), Local::now(), &dir).unwrap();

    assert_ne!(a, b);
    assert!(a.is_file());
    assert!(b.is_file());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn out_of_range_dimensions_are_clamped_into_the_rendered_gif() {
    if load_default_font().is_err() {
        return;
    }

    let mut req = future_request("clamped", 1);
    req.width = 10_000;
    req.height = 10;

    let dir = temp_dir("e2e_clamped");
    let path = generate_into(&req, Local::now(), &dir).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let decoder = gif::DecodeOptions::new().read_info(file).unwrap();
    assert_eq!(decoder.width(), 900);
    assert_eq!(decoder.height(), 150);

    std::fs::remove_dir_all(&dir).ok();
}
