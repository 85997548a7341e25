use super::*;
use crate::ports::clock::ManualClock;

fn tone(at: u64, freq: f64, ms: u64, wave: Waveform) -> ScheduledTone {
    ScheduledTone {
        at: Millis(at),
        tone: Tone::new(freq, Millis(ms)).wave(wave).gain(0.5),
    }
}

#[test]
fn render_length_covers_last_tone() {
    let out = render_mono(
        &[
            tone(0, 440.0, 10, Waveform::Square),
            tone(20, 440.0, 10, Waveform::Sine),
        ],
        1000,
    );
    assert_eq!(out.len(), 30);
    assert!(out[12..18].iter().all(|s| *s == 0.0));
}

#[test]
fn square_is_bounded_by_gain() {
    let out = render_mono(&[tone(0, 100.0, 100, Waveform::Square)], 8000);
    let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.45 && peak <= 0.5 + 1e-6);
}

#[test]
fn overlapping_tones_clamp() {
    let loud = |at| ScheduledTone {
        at: Millis(at),
        tone: Tone::new(50.0, Millis(100)).gain(1.0),
    };
    let out = render_mono(&[loud(0), loud(0), loud(0)], 8000);
    assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn noise_is_deterministic() {
    let a = render_mono(&[tone(0, 1.0, 20, Waveform::Noise)], 8000);
    let b = render_mono(&[tone(0, 1.0, 20, Waveform::Noise)], 8000);
    assert_eq!(a, b);
}

#[test]
fn zero_hz_noise_is_audible() {
    let out = render_mono(&[tone(0, 0.0, 240, Waveform::Noise)], 8000);
    assert_eq!(out.len(), 1920);
    let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.1, "peak {peak}");
}

#[test]
fn zero_hz_pitched_tones_stay_silent() {
    let out = render_mono(&[tone(0, 0.0, 50, Waveform::Square)], 8000);
    assert!(out.iter().all(|s| *s == 0.0));
}

#[test]
fn synth_pins_tones_to_clock_time() {
    let clock = Rc::new(ManualClock::new());
    let synth = SynthAudio::new(clock.clone(), 8000);
    let out = synth.open().unwrap();
    clock.advance(Millis(250));
    out.play(&Tone::new(440.0, Millis(50)).at(Millis(10)));
    out.close();
    out.play(&Tone::new(440.0, Millis(50)));

    let scheduled = synth.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].at, Millis(260));
    assert_eq!(synth.render().len(), 8000 * 310 / 1000);
}

#[test]
fn zero_sample_rate_fails_to_open() {
    let synth = SynthAudio::new(Rc::new(ManualClock::new()), 0);
    assert!(synth.open().is_err());
}

#[test]
fn f32le_writes_four_bytes_per_sample() {
    let dir = std::path::PathBuf::from("target").join("synth_unit");
    let path = dir.join("tone.f32le");
    write_f32le(&[0.0, 0.5, -0.5], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 12);
    assert_eq!(f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 0.5);
}
