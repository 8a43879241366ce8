use raspicam::{
    process::exit_code, CameraControls, CameraError, ExposureMode, LoadOptions, MockRunner,
    ProcessState, Raspistill, Raspivid, Shutdown, StillOptions, StopPolicy, TimeUnit,
    VideoOptions, WhiteBalance,
};
use std::time::Duration;

fn still() -> (Raspistill, MockRunner) {
    let runner = MockRunner::new();
    (Raspistill::new().with_runner(runner.clone()), runner)
}

fn video() -> (Raspivid, MockRunner) {
    let runner = MockRunner::new();
    (Raspivid::new().with_runner(runner.clone()), runner)
}

/// Construct-time options end up in the executed command
#[test]
fn test_options_reach_the_command_line() {
    let options = StillOptions::from_json_str(r#"{"contrast": 50, "iso": 500}"#).unwrap();
    let runner = MockRunner::new();
    let mut camera = Raspistill::with_options(&options)
        .unwrap()
        .with_runner(runner.clone());

    camera.take_picture("pic.jpg").unwrap();

    let command = runner.last_command().unwrap();
    assert_eq!(command.program(), "raspistill");
    assert_eq!(
        command.args(),
        ["--contrast", "50", "--ISO", "500", "--output", "pic.jpg"]
    );
    assert_eq!(
        command.to_string(),
        "raspistill --contrast '50' --ISO '500' --output 'pic.jpg'"
    );
}

#[test]
fn test_flags_precede_values_and_unset_flags_disappear() {
    let (mut camera, _) = still();
    camera
        .contrast(10)
        .unwrap()
        .flip(true)
        .no_preview(true)
        .horizontal_flip(false);

    assert_eq!(
        camera.arguments(),
        ["--vflip", "--nopreview", "--contrast", "10"]
    );
}

#[test]
fn test_setting_a_value_twice_keeps_its_position() {
    let (mut camera, _) = still();
    camera.sharpness(10).unwrap().brightness(60).unwrap();
    camera.sharpness(-30).unwrap();

    assert_eq!(
        camera.arguments(),
        ["--sharpness", "-30", "--brightness", "60"]
    );
}

#[test]
fn test_rejected_value_keeps_previous_setting() {
    let (mut camera, _) = still();
    camera.saturation(20).unwrap();

    let err = camera.saturation(101).unwrap_err();
    assert!(matches!(err, CameraError::Validation(_)));
    assert!(!err.is_fatal());
    assert_eq!(camera.command().value_of("saturation"), Some("20"));
}

#[test]
fn test_shared_range_bounds() {
    let (mut camera, _) = still();

    assert!(camera.iso(100).is_ok() && camera.iso(800).is_ok());
    assert!(camera.iso(99).is_err() && camera.iso(801).is_err());
    assert!(camera.exposure_compensation(-10).is_ok());
    assert!(camera.exposure_compensation(11).is_err());
    assert!(camera.brightness(-1).is_err());
    assert!(camera.sensor_mode(7).is_ok());
    assert!(camera.sensor_mode(8).is_err());
    assert!(camera.rotate(270).is_ok());
    assert!(camera.rotate(45).is_err());
}

#[test]
fn test_enumerated_modes_use_tool_spelling() {
    let (mut camera, _) = still();
    camera
        .exposure("fireworks".parse::<ExposureMode>().unwrap())
        .white_balance(WhiteBalance::Fluorescent);

    let command = camera.command();
    assert_eq!(command.value_of("exposure"), Some("fireworks"));
    assert_eq!(command.value_of("awb"), Some("fluorescent"));
    assert!("dark".parse::<ExposureMode>().is_err());
}

#[test]
fn test_shutter_speed_in_microseconds() {
    let (mut camera, _) = still();
    camera.shutter_speed(1.54, TimeUnit::Second).unwrap();
    assert_eq!(camera.command().value_of("shutter"), Some("1540000"));

    assert!(camera.shutter_speed(0.0, TimeUnit::Second).is_err());
    assert!(camera.shutter_speed(-5.0, TimeUnit::Millisecond).is_err());
    assert_eq!(camera.command().value_of("shutter"), Some("1540000"));
}

#[test]
fn test_exif_limit_and_disable() {
    let (mut camera, runner) = still();
    for i in 0..raspicam::options::MAX_EXIF_TAGS {
        camera.add_exif(&format!("IFD0.Tag{i}"), "x").unwrap();
    }
    assert!(matches!(
        camera.add_exif("IFD0.Extra", "x"),
        Err(CameraError::ExifOverflow { max: 32 })
    ));

    camera.disable_exif();
    camera.take_picture("plain.jpg").unwrap();

    let command = runner.last_command().unwrap();
    assert_eq!(command.values_of("exif").collect::<Vec<_>>(), ["none"]);
}

#[test]
fn test_last_output_is_kept() {
    let runner = MockRunner::new().with_stdout("Camera ready\n");
    let mut camera = Raspistill::new().with_runner(runner);

    assert!(camera.last_output().is_none());
    camera.take_picture("pic.jpg").unwrap();
    assert_eq!(camera.last_output(), Some("Camera ready\n"));
}

#[test]
fn test_exit_codes_become_errors() {
    let cases = [
        (exit_code::COMMAND_NOT_FOUND, "Command not found"),
        (exit_code::CANNOT_EXECUTE, "Command invoked cannot execute"),
        (exit_code::CTRL_C, "Script terminated by Control-C"),
    ];

    for (code, description) in cases {
        let runner = MockRunner::new().with_exit_code(code);
        let mut camera = Raspivid::new().with_runner(runner);
        let err = camera
            .record_video("clip.h264", 1.0, TimeUnit::Second)
            .unwrap_err();

        assert!(err.to_string().contains(description), "{err}");
        assert!(matches!(err, CameraError::CommandFailed { code: c, .. } if c == code));
    }
}

#[test]
fn test_video_options_from_json() {
    let options = VideoOptions::from_json_str(
        r#"{"width": 1280, "height": 720, "framerate": 30, "no_preview": true}"#,
    )
    .unwrap();
    let mut camera = Raspivid::with_options(&options).unwrap();
    assert!(camera.command().has_flag("nopreview"));

    let too_wide = VideoOptions::from_json_str(r#"{"width": 2592}"#).unwrap();
    assert!(Raspivid::with_options(&too_wide).is_err());
    assert!(camera.width(1920).is_ok());
}

#[test]
fn test_stop_without_start_is_a_no_op() {
    let (mut camera, runner) = video();

    camera.stop().unwrap();
    assert_eq!(camera.process_state(), ProcessState::Idle);
    assert_eq!(runner.terminate_calls(), 0);
}

#[test]
fn test_graceful_stop() {
    let (mut camera, runner) = video();
    camera.output_file("live.h264").unwrap();

    assert!(camera.start().unwrap());
    camera.stop().unwrap();

    assert!(!camera.is_running());
    assert_eq!(runner.terminate_calls(), 1);
    assert_eq!(runner.kill_calls(), 0);
}

#[test]
fn test_restart_after_process_exits() {
    let (mut camera, runner) = video();
    camera.output_file("a.h264").unwrap();
    camera.start().unwrap();

    runner.finish();
    assert_eq!(camera.process_state(), ProcessState::Terminated);

    camera.output_file("b.h264").unwrap();
    assert!(camera.start().unwrap());
    assert_eq!(runner.commands().len(), 2);
    assert_eq!(runner.last_command().unwrap().value_of("output"), Some("b.h264"));
}

#[test]
fn test_unkillable_process_reports_failure() {
    let runner = MockRunner::new().with_shutdown(Shutdown::Unkillable);
    let mut camera = Raspivid::new().with_runner(runner.clone());
    camera.set_stop_policy(StopPolicy::new(3, Duration::ZERO));

    camera.start().unwrap();
    let err = camera.stop().unwrap_err();

    assert!(matches!(err, CameraError::KillFailed { pid: 1000 }));
    assert!(err.is_fatal());
    assert_eq!(runner.kill_calls(), 1);
}

#[test]
fn test_dashed_filename_is_a_value() {
    let (mut camera, runner) = still();
    camera.add_exif("IFD0.Artist", "--me").unwrap();
    camera.take_picture("--x.jpg").unwrap();

    let command = runner.last_command().unwrap();
    assert_eq!(command.value_of("output"), Some("--x.jpg"));
    assert!(!command.has_flag("x.jpg"));
    assert_eq!(
        command.to_string(),
        "raspistill --exif 'IFD0.Artist=--me' --output '--x.jpg'"
    );
}

#[test]
fn test_timelapse_settings_do_not_carry_over() {
    let (mut camera, runner) = still();
    camera
        .start_timelapse("image%04d.jpg", 10.0, 120.0, TimeUnit::Second)
        .unwrap();
    camera.take_picture("single.jpg").unwrap();

    assert_eq!(
        runner.last_command().unwrap().to_string(),
        "raspistill --output 'single.jpg'"
    );
}
