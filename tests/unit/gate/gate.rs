use super::*;

fn img() -> RgbImage {
    RgbImage::new(4, 4)
}

#[test]
fn accept_all_accepts() {
    assert!(AcceptAll.contains_subject(&img()).unwrap());
}

#[test]
fn empty_command_line_is_rejected() {
    assert!(matches!(
        CommandGate::from_command_line("   "),
        Err(MorphError::Config(_))
    ));
}

#[test]
fn missing_program_is_a_detector_error() {
    let gate = CommandGate::new("pixmorph-no-such-detector-binary", Vec::<String>::new());
    assert!(matches!(
        gate.contains_subject(&img()),
        Err(MorphError::Detector(_))
    ));
}

#[cfg(unix)]
#[test]
fn exit_status_maps_to_verdict() {
    let yes = CommandGate::from_command_line("sh -c true").unwrap();
    // `sh -c <script> <arg0>`: the image path becomes $0.
    assert!(yes.contains_subject(&img()).unwrap());

    let no = CommandGate::new("sh", ["-c", "exit 1"]);
    assert!(!no.contains_subject(&img()).unwrap());

    let broken = CommandGate::new("sh", ["-c", "echo nope >&2; exit 3"]);
    let err = broken.contains_subject(&img()).unwrap_err();
    assert!(err.to_string().contains("nope"), "{err}");
}

#[cfg(unix)]
#[test]
fn detector_sees_a_readable_png() {
    let gate = CommandGate::new("sh", ["-c", "test -s \"$0\""]);
    assert!(gate.contains_subject(&img()).unwrap());
}
