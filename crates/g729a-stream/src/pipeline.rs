//! Frame-by-frame stream conversion
//!
//! Both directions read fixed-size frames sequentially and write each coder
//! output as soon as it is produced. They differ only at the end of the
//! stream: encode pads a short PCM tail with silence (unless told to drop
//! it), decode always drops a short compressed tail, since padding it would
//! hand the decoder a frame that never existed.

use crate::coder::Coder;
use crate::config::PartialFrame;
use crate::error::{Result, StreamError};
use crate::native::NativeCodec;
use crate::types::{ConversionReport, Direction};
use std::io::{self, Read, Write};
use tracing::{debug, warn};

/// Encode raw PCM from `input` into concatenated compressed frames
///
/// A final read of 1 to 159 bytes is handled by `partial_frame`. A stream
/// that ends on a frame boundary, including an empty one, produces no extra
/// frame.
///
/// # Errors
///
/// Returns [`StreamError::CodecProcess`] or I/O errors as they occur. Frames
/// written before the failure stay in `output`.
pub fn encode_stream<B, R, W>(
    coder: &mut Coder<B>,
    input: R,
    output: W,
    partial_frame: PartialFrame,
) -> Result<ConversionReport>
where
    B: NativeCodec,
    R: Read,
    W: Write,
{
    expect_direction(coder, Direction::Encode)?;
    run(coder, input, output, partial_frame)
}

/// Decode concatenated compressed frames from `input` into raw PCM
///
/// Reading stops at the first read shorter than one frame; its bytes are
/// discarded.
///
/// # Errors
///
/// Returns [`StreamError::CodecProcess`] or I/O errors as they occur. PCM
/// written before the failure stays in `output`.
pub fn decode_stream<B, R, W>(coder: &mut Coder<B>, input: R, output: W) -> Result<ConversionReport>
where
    B: NativeCodec,
    R: Read,
    W: Write,
{
    expect_direction(coder, Direction::Decode)?;
    run(coder, input, output, PartialFrame::Discard)
}

fn expect_direction<B: NativeCodec>(coder: &Coder<B>, direction: Direction) -> Result<()> {
    if coder.direction() == direction {
        return Ok(());
    }
    Err(StreamError::FrameSize {
        expected: direction.input_frame_size(),
        actual: coder.input_frame_size(),
    })
}

fn run<B, R, W>(
    coder: &mut Coder<B>,
    mut input: R,
    mut output: W,
    partial_frame: PartialFrame,
) -> Result<ConversionReport>
where
    B: NativeCodec,
    R: Read,
    W: Write,
{
    let direction = coder.direction();
    let mut report = ConversionReport::new(direction);
    let mut frame = vec![0u8; coder.input_frame_size()];

    debug!(%direction, frame_size = frame.len(), "Starting stream conversion");

    loop {
        let filled = read_frame(&mut input, &mut frame)?;
        report.bytes_read += filled as u64;

        if filled == 0 {
            break;
        }
        if filled < frame.len() {
            match partial_frame {
                PartialFrame::ZeroPad => {
                    let padding = frame.len() - filled;
                    warn!(%direction, filled, padding, "Zero-padding partial final frame");
                    frame[filled..].fill(0);
                    report.padded_bytes = padding;
                }
                PartialFrame::Discard => {
                    warn!(%direction, discarded = filled, "Discarding partial final frame");
                    report.discarded_bytes = filled;
                    break;
                }
            }
        }

        let produced = coder.process(&frame)?;
        output.write_all(&produced)?;
        report.frames += 1;
        report.bytes_written += produced.len() as u64;

        if filled < frame.len() {
            break;
        }
    }

    output.flush()?;
    debug!(
        %direction,
        frames = report.frames,
        bytes_read = report.bytes_read,
        bytes_written = report.bytes_written,
        "Stream conversion finished"
    );
    Ok(report)
}

/// Fill `buf` from `reader`, stopping early only at end of stream
///
/// Returns the number of bytes read; anything below `buf.len()` means the
/// stream is exhausted.
pub fn read_frame<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
