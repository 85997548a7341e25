use super::*;

#[test]
fn no_audio_fails_to_open() {
    let err = NoAudio.open().err().unwrap();
    assert!(matches!(err, CutsceneError::Audio(_)));
}

#[test]
fn recording_channel_drops_tones_after_close() {
    let audio = RecordingAudio::new();
    let out = audio.open().unwrap();
    out.play(&Tone::new(440.0, Millis(100)));
    out.close();
    out.close();
    out.play(&Tone::new(880.0, Millis(100)));
    assert_eq!(audio.tones().len(), 1);
    assert_eq!(audio.opened(), 1);
    assert_eq!(audio.closed(), 1);
}

#[test]
fn tone_builders() {
    let t = Tone::new(220.0, Millis(80))
        .at(Millis(40))
        .wave(Waveform::Triangle)
        .gain(0.5)
        .slide_to(110.0);
    assert_eq!(t.start, Millis(40));
    assert_eq!(t.wave, Waveform::Triangle);
    assert_eq!(t.gain, 0.5);
    assert_eq!(t.slide_to_hz, Some(110.0));
}
