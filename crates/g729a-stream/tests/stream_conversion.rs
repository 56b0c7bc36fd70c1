//! End-to-end behavior of the coder adapter and streaming pipeline

mod common;

use common::{pcm_ramp, ScriptedCodec};
use g729a_stream::container::{WavPcmWriter, WAV_HEADER_BYTES};
use g729a_stream::{
    decode_stream, encode_stream, Coder, ErrorCategory, PartialFrame, StreamError,
    COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES,
};
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::sync::Arc;

fn encode_bytes(codec: &ScriptedCodec, pcm: &[u8], policy: PartialFrame) -> Vec<u8> {
    let mut coder = Coder::encoder(codec).unwrap();
    let mut out = Vec::new();
    encode_stream(&mut coder, pcm, &mut out, policy).unwrap();
    out
}

fn decode_bytes(codec: &ScriptedCodec, bitstream: &[u8]) -> Vec<u8> {
    let mut coder = Coder::decoder(codec).unwrap();
    let mut out = Vec::new();
    decode_stream(&mut coder, bitstream, &mut out).unwrap();
    out
}

#[test]
fn test_encode_empty_input_produces_nothing() {
    let codec = ScriptedCodec::new();
    let out = encode_bytes(&codec, &[], PartialFrame::ZeroPad);
    assert!(out.is_empty());
    assert_eq!(ScriptedCodec::count(&codec.encoder_calls), 0);
}

#[test]
fn test_encode_single_silent_frame() {
    let codec = ScriptedCodec::new();
    let out = encode_bytes(&codec, &[0u8; PCM_FRAME_BYTES], PartialFrame::ZeroPad);
    assert_eq!(out.len(), COMPRESSED_FRAME_BYTES);
}

#[test]
fn test_encode_pads_partial_final_frame() {
    let codec = ScriptedCodec::new();
    let pcm = pcm_ramp(3 * PCM_FRAME_BYTES + 37);

    let mut coder = Coder::encoder(&codec).unwrap();
    let mut out = Vec::new();
    let report = encode_stream(&mut coder, pcm.as_slice(), &mut out, PartialFrame::ZeroPad).unwrap();

    assert_eq!(report.frames, 4);
    assert_eq!(report.padded_bytes, PCM_FRAME_BYTES - 37);
    assert_eq!(report.bytes_read, pcm.len() as u64);
    assert_eq!(out.len(), 4 * COMPRESSED_FRAME_BYTES);

    // Same bytes as encoding the explicitly padded input.
    let mut padded = pcm.clone();
    padded.resize(4 * PCM_FRAME_BYTES, 0);
    assert_eq!(out, encode_bytes(&ScriptedCodec::new(), &padded, PartialFrame::ZeroPad));
}

#[test]
fn test_encode_can_discard_partial_final_frame() {
    let codec = ScriptedCodec::new();
    let pcm = pcm_ramp(2 * PCM_FRAME_BYTES + 1);

    let mut coder = Coder::encoder(&codec).unwrap();
    let mut out = Vec::new();
    let report = encode_stream(&mut coder, pcm.as_slice(), &mut out, PartialFrame::Discard).unwrap();

    assert_eq!(report.frames, 2);
    assert_eq!(report.discarded_bytes, 1);
    assert_eq!(out.len(), 2 * COMPRESSED_FRAME_BYTES);
}

#[test]
fn test_encoder_state_carries_history() {
    let codec = ScriptedCodec::new();
    let frame = pcm_ramp(PCM_FRAME_BYTES);
    let mut twice = frame.clone();
    twice.extend_from_slice(&frame);

    let out = encode_bytes(&codec, &twice, PartialFrame::ZeroPad);
    assert_ne!(out[..COMPRESSED_FRAME_BYTES], out[COMPRESSED_FRAME_BYTES..]);
}

#[test]
fn test_decode_discards_trailing_bytes() {
    let codec = ScriptedCodec::new();
    let bitstream = pcm_ramp(5 * COMPRESSED_FRAME_BYTES + 9);

    let mut coder = Coder::decoder(&codec).unwrap();
    let mut out = Vec::new();
    let report = decode_stream(&mut coder, bitstream.as_slice(), &mut out).unwrap();

    assert_eq!(report.frames, 5);
    assert_eq!(report.discarded_bytes, 9);
    assert_eq!(report.padded_bytes, 0);
    assert_eq!(out.len(), 5 * PCM_FRAME_BYTES);
    assert_eq!(ScriptedCodec::count(&codec.decoder_calls), 5);
}

#[test]
fn test_decode_empty_input_into_wav() {
    let codec = ScriptedCodec::new();
    let mut coder = Coder::decoder(&codec).unwrap();
    let mut cursor = Cursor::new(Vec::new());

    let mut wav = WavPcmWriter::new(&mut cursor).unwrap();
    let report = decode_stream(&mut coder, &[0u8; 0][..], &mut wav).unwrap();
    wav.finish().unwrap();

    assert_eq!(report.frames, 0);
    let bytes = cursor.into_inner();
    assert_eq!(bytes.len(), WAV_HEADER_BYTES);

    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len(), 0);
    assert_eq!(reader.spec().sample_rate, 8000);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 16);
}

#[test]
fn test_round_trip_preserves_sample_count() {
    let codec = ScriptedCodec::new();
    let frames = 12;
    let bitstream = encode_bytes(&codec, &pcm_ramp(frames * PCM_FRAME_BYTES), PartialFrame::ZeroPad);
    assert_eq!(bitstream.len(), frames * COMPRESSED_FRAME_BYTES);

    let mut coder = Coder::decoder(&codec).unwrap();
    let mut cursor = Cursor::new(Vec::new());
    let mut wav = WavPcmWriter::new(&mut cursor).unwrap();
    decode_stream(&mut coder, bitstream.as_slice(), &mut wav).unwrap();
    wav.finish().unwrap();

    let reader = hound::WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(reader.len() as usize, frames * PCM_FRAME_BYTES / 2);
}

#[test]
fn test_process_failure_keeps_written_frames() {
    let codec = ScriptedCodec {
        fail_encode_at: Some(2),
        ..ScriptedCodec::new()
    };
    let mut coder = Coder::encoder(&codec).unwrap();
    let mut out = Vec::new();
    let err = encode_stream(&mut coder, pcm_ramp(5 * PCM_FRAME_BYTES).as_slice(), &mut out, PartialFrame::ZeroPad)
        .unwrap_err();

    match err {
        StreamError::CodecProcess { operation, status, frame } => {
            assert_eq!(operation, "G729A_Encoder_Process");
            assert_eq!(status, 7);
            assert_eq!(frame, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(out.len(), 2 * COMPRESSED_FRAME_BYTES);
    assert_eq!(ScriptedCodec::count(&codec.encoder_calls), 3);
}

#[test]
fn test_decode_failure_aborts_run() {
    let codec = ScriptedCodec {
        fail_decode_at: Some(0),
        ..ScriptedCodec::new()
    };
    let mut coder = Coder::decoder(&codec).unwrap();
    let mut out = Vec::new();
    let err = decode_stream(&mut coder, &[0u8; 30][..], &mut out).unwrap_err();

    assert!(matches!(err, StreamError::CodecProcess { operation: "G729A_Decoder_Process", .. }));
    assert!(out.is_empty());
    assert_eq!(ScriptedCodec::count(&codec.decoder_calls), 1);
}

#[test]
fn test_each_coder_initializes_once() {
    let codec = ScriptedCodec::new();
    let mut encoder = Coder::encoder(&codec).unwrap();
    let _decoder = Coder::decoder(&codec).unwrap();

    encoder.process(&[0u8; PCM_FRAME_BYTES]).unwrap();
    encoder.process(&[0u8; PCM_FRAME_BYTES]).unwrap();

    assert_eq!(ScriptedCodec::count(&codec.encoder_inits), 1);
    assert_eq!(ScriptedCodec::count(&codec.decoder_inits), 1);
}

#[test]
fn test_init_failure_yields_no_coder() {
    let codec = ScriptedCodec {
        decoder_init_status: -3,
        ..ScriptedCodec::new()
    };
    let err = Coder::decoder(&codec).unwrap_err();
    assert!(matches!(
        err,
        StreamError::CodecInit { operation: "G729A_Decoder_Init", status: -3 }
    ));
    assert_eq!(ScriptedCodec::count(&codec.decoder_calls), 0);
}

#[test]
fn test_wrong_frame_size_never_reaches_codec() {
    let codec = ScriptedCodec::new();
    let mut decoder = Coder::decoder(&codec).unwrap();

    for len in [0, 9, 11, PCM_FRAME_BYTES] {
        let err = decoder.process(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, StreamError::FrameSize { expected: 10, actual } if actual == len));
    }
    assert_eq!(ScriptedCodec::count(&codec.decoder_calls), 0);
}

#[test]
fn test_pipeline_rejects_wrong_direction() {
    let codec = ScriptedCodec::new();
    let mut decoder = Coder::decoder(&codec).unwrap();
    let mut out = Vec::new();
    let err = encode_stream(&mut decoder, &[0u8; 160][..], &mut out, PartialFrame::ZeroPad).unwrap_err();
    assert!(matches!(err, StreamError::FrameSize { .. }));
    assert_eq!(ScriptedCodec::count(&codec.decoder_calls), 0);
}

#[test]
fn test_encoder_and_decoder_on_separate_threads() {
    let codec = Arc::new(ScriptedCodec::new());

    let encoder = {
        let codec = Arc::clone(&codec);
        std::thread::spawn(move || {
            let mut coder = Coder::encoder(codec).unwrap();
            let mut out = Vec::new();
            encode_stream(&mut coder, pcm_ramp(8 * PCM_FRAME_BYTES).as_slice(), &mut out, PartialFrame::ZeroPad)
                .unwrap();
            out
        })
    };
    let decoder = {
        let codec = Arc::clone(&codec);
        std::thread::spawn(move || {
            let mut coder = Coder::decoder(codec).unwrap();
            let mut out = Vec::new();
            decode_stream(&mut coder, pcm_ramp(6 * COMPRESSED_FRAME_BYTES).as_slice(), &mut out).unwrap();
            out
        })
    };

    assert_eq!(encoder.join().unwrap().len(), 8 * COMPRESSED_FRAME_BYTES);
    assert_eq!(decoder.join().unwrap().len(), 6 * PCM_FRAME_BYTES);
}

#[test]
fn test_decode_output_follows_frames() {
    let codec = ScriptedCodec::new();
    let bitstream: Vec<u8> = (0..COMPRESSED_FRAME_BYTES as u8).collect();
    let pcm = decode_bytes(&codec, &bitstream);
    assert_eq!(pcm.len(), PCM_FRAME_BYTES);
    assert_eq!(&pcm[..16], &[0u8; 16]);
    assert_eq!(&pcm[144..], &[9u8; 16]);
}

/// Accepts `limit` bytes, then fails every write.
struct FullDisk {
    inner: Cursor<Vec<u8>>,
    written: usize,
    limit: usize,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.written;
        if room == 0 {
            return Err(io::Error::other("disk full"));
        }
        let n = self.inner.write(&buf[..buf.len().min(room)])?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FullDisk {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_wav_write_failure_is_container_error() {
    let codec = ScriptedCodec::new();
    let mut coder = Coder::decoder(&codec).unwrap();
    let sink = FullDisk {
        inner: Cursor::new(Vec::new()),
        written: 0,
        limit: WAV_HEADER_BYTES + 10,
    };

    let mut wav = WavPcmWriter::new(sink).unwrap();
    let err = decode_stream(&mut coder, &[0u8; COMPRESSED_FRAME_BYTES][..], &mut wav).unwrap_err();

    assert!(matches!(err, StreamError::Wav(hound::Error::IoError(_))));
    assert_eq!(err.category(), ErrorCategory::Container);
}
