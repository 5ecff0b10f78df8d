// End-to-end WAV volume tests through real files on disk.

use std::fs;
use std::path::PathBuf;

use bmpfilter_rs::wav::{self, HEADER_SIZE};
use bmpfilter_rs::{Error, ValidationError};

fn build_wav(samples: &[i16]) -> Vec<u8> {
    // the codec copies the 44 header bytes through without inspecting
    // them, so a recognizable fill pattern is enough
    let mut data = vec![0x52u8; HEADER_SIZE];
    for s in samples {
        data.extend_from_slice(&s.to_le_bytes());
    }
    data
}

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bmpfilter-wav-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn read_samples(data: &[u8]) -> Vec<i16> {
    data[HEADER_SIZE..]
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

#[test]
fn doubling_scales_and_clamps() {
    let in_file = temp_path("loud_in.wav");
    let out_file = temp_path("loud_out.wav");
    fs::write(&in_file, build_wav(&[100, -250, 20_000, -20_000])).unwrap();

    let report = wav::change_volume(&in_file, &out_file, 2.0).unwrap();
    assert_eq!(report.samples, 4);
    assert_eq!(report.clipped, 2);

    let written = fs::read(&out_file).unwrap();
    assert_eq!(
        read_samples(&written),
        vec![200, -500, i16::MAX, i16::MIN]
    );
}

#[test]
fn header_survives_unchanged() {
    let in_file = temp_path("header_in.wav");
    let out_file = temp_path("header_out.wav");
    let original = build_wav(&[1, 2, 3]);
    fs::write(&in_file, &original).unwrap();

    wav::change_volume(&in_file, &out_file, 0.5).unwrap();

    let written = fs::read(&out_file).unwrap();
    assert_eq!(&written[..HEADER_SIZE], &original[..HEADER_SIZE]);
}

#[test]
fn unit_factor_round_trips_samples() {
    let in_file = temp_path("unit_in.wav");
    let out_file = temp_path("unit_out.wav");
    let original = build_wav(&[0, 1, -1, i16::MAX, i16::MIN]);
    fs::write(&in_file, &original).unwrap();

    let report = wav::change_volume(&in_file, &out_file, 1.0).unwrap();
    assert_eq!(report.clipped, 0);
    assert_eq!(fs::read(&out_file).unwrap(), original);
}

#[test]
fn empty_data_section_is_rejected_and_writes_nothing() {
    let in_file = temp_path("empty_in.wav");
    let out_file = temp_path("empty_out.wav");
    fs::write(&in_file, build_wav(&[])).unwrap();

    let err = wav::change_volume(&in_file, &out_file, 2.0).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptyAudio)
    ));
    assert!(!out_file.exists());
}
