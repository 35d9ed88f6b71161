//! WAV Normalizer - 把上传音频转换为识别服务要求的 16kHz 单声道 16 位 PCM WAV
//!
//! 使用 symphonia 解码任意采样率/声道数的 WAV，多声道取平均混为单声道，
//! 再线性插值重采样到 16kHz

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::SttError;

/// 识别服务要求的采样率
pub const RECOGNITION_SAMPLE_RATE: u32 = 16_000;

/// 解码后的交错 PCM
struct DecodedAudio {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: usize,
}

/// 解码、混音、重采样并重新编码
pub fn normalize_for_recognition(data: &[u8]) -> Result<Vec<u8>, SttError> {
    let decoded = decode_wav(data)?;
    let mono = downmix(&decoded.samples, decoded.channels);
    let resampled = resample(&mono, decoded.sample_rate, RECOGNITION_SAMPLE_RATE);

    tracing::debug!(
        source_rate = decoded.sample_rate,
        source_channels = decoded.channels,
        frames = resampled.len(),
        "Audio normalized for recognition"
    );

    Ok(encode_pcm16_wav(&resampled, RECOGNITION_SAMPLE_RATE, 1))
}

fn decode_wav(data: &[u8]) -> Result<DecodedAudio, SttError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let opened = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| SttError::InvalidAudio(format!("not a readable WAV: {}", e)))?;
    let mut format = opened.format;

    let track = format
        .default_track()
        .ok_or_else(|| SttError::InvalidAudio("no audio track".to_string()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&r| r > 0)
        .ok_or_else(|| SttError::InvalidAudio("unknown sample rate".to_string()))?;
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .filter(|&c| c > 0)
        .ok_or_else(|| SttError::InvalidAudio("unknown channel count".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SttError::InvalidAudio(format!("unsupported codec: {}", e)))?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(SttError::InvalidAudio(format!("packet read: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Skipping undecodable audio packet: {}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        let mut buf = SampleBuffer::<f32>::new(frames as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(&buf.samples()[..frames * spec.channels.count()]);
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// 交错多声道 -> 单声道（逐帧取平均）
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// 单声道线性插值重采样
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let step = from_rate as f64 / to_rate as f64;
    let last = samples.len() - 1;
    let new_len = (samples.len() as u64 * to_rate as u64 / from_rate as u64) as usize;

    (0..new_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = (pos as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            let s0 = samples[idx];
            let s1 = samples[(idx + 1).min(last)];
            s0 + (s1 - s0) * frac
        })
        .collect()
}

/// 编码 16 位 PCM WAV（44 字节头）
pub fn encode_pcm16_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (samples.len() * 2) as u32;

    let mut wav = Vec::with_capacity(44 + samples.len() * 2);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        wav.extend_from_slice(&value.to_le_bytes());
    }

    wav
}
