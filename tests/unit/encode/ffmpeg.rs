use super::*;
use crate::encode::sink::AudioInputConfig;

fn cfg(audio: Option<AudioInputConfig>) -> SinkConfig {
    SinkConfig {
        width: 64,
        height: 48,
        frame_rate: 24,
        audio,
    }
}

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn config_validation_catches_bad_values() {
    let mut c = cfg(None);
    assert!(validate_sink_config(&c).is_ok());
    c.width = 0;
    assert!(validate_sink_config(&c).is_err());
    c.width = 63;
    assert!(validate_sink_config(&c).is_err());
    c.width = 64;
    c.frame_rate = 0;
    assert!(validate_sink_config(&c).is_err());
}

#[test]
fn silent_output_disables_audio() {
    let args = strings(&ffmpeg_args(&cfg(None), &FfmpegSinkOpts::new("out/video.mp4")));
    assert_eq!(args.first().map(String::as_str), Some("-y"));
    assert!(args.contains(&"-an".to_string()));
    assert!(args.contains(&"rgb24".to_string()));
    assert!(args.contains(&"64x48".to_string()));
    assert!(!args.contains(&"aac".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("out/video.mp4"));
}

#[test]
fn narrated_output_maps_audio_as_second_input() {
    let audio = AudioInputConfig {
        path: PathBuf::from("/tmp/run/narration.mp3"),
        duration_secs: 3.2,
    };
    let args = strings(&ffmpeg_args(&cfg(Some(audio)), &FfmpegSinkOpts::new("v.mp4")));
    let second_input = args
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_str() == "-i")
        .nth(1)
        .map(|(i, _)| args[i + 1].clone());
    assert_eq!(second_input.as_deref(), Some("/tmp/run/narration.mp3"));
    assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "aac"));
    assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "1:a:0"));
    assert!(!args.contains(&"-an".to_string()));
    assert!(!args.contains(&"-shortest".to_string()));
}

#[test]
fn frame_rate_precedes_pipe_input() {
    let args = strings(&ffmpeg_args(&cfg(None), &FfmpegSinkOpts::new("v.mp4")));
    let r = args.iter().position(|a| a == "-r").unwrap();
    let pipe = args.iter().position(|a| a == "pipe:0").unwrap();
    assert!(r < pipe);
    assert_eq!(args[r + 1], "24");
}

#[test]
fn push_before_begin_is_an_encoding_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never.mp4"));
    let frame = Frame::solid(2, 2, [0, 0, 0]).unwrap();
    assert!(matches!(
        sink.push_frame(0, &frame),
        Err(ReelError::Encoding(_))
    ));
}
