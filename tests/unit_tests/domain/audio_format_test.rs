use hereabouts::domain::{AudioCodec, AudioFormat};

#[test]
fn given_default_format_when_inspected_then_mp3() {
    let format = AudioFormat::default();
    assert_eq!(format.as_str(), "mp3_44100_128");
    assert_eq!(format.codec(), AudioCodec::Mp3);
    assert_eq!(format.extension(), "mp3");
    assert_eq!(format.as_mime(), "audio/mpeg");
}

#[test]
fn given_uppercase_pcm_format_when_parsing_then_normalizes() {
    let format: AudioFormat = "PCM_16000".parse().unwrap();
    assert_eq!(format.as_str(), "pcm_16000");
    assert_eq!(format.codec(), AudioCodec::Pcm);
    assert_eq!(format.to_string(), "pcm_16000");
}

#[test]
fn given_unknown_codec_when_parsing_then_error_names_it() {
    let err = "wav_44100".parse::<AudioFormat>().unwrap_err();
    assert!(err.contains("Unsupported audio format"));
    assert!(err.contains("wav"));
}
