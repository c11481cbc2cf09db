//! Video decoding through the `ffmpeg` command-line tools.
//!
//! `ffprobe` reports the stream dimensions, then `ffmpeg` decodes to raw
//! `bgr24` frames on a pipe. Decoding is blocking; the benchmark drives it
//! from a blocking thread.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use gpuprobe_core::{Frame, FrameSource, PixelLayout, StreamError, StreamOpener};
use tracing::debug;

/// Opens video files as frame sources.
#[derive(Debug, Clone)]
pub struct FfmpegStreamOpener {
    ffmpeg: String,
    ffprobe: String,
}

impl Default for FfmpegStreamOpener {
    fn default() -> Self {
        Self::with_programs("ffmpeg", "ffprobe")
    }
}

impl FfmpegStreamOpener {
    /// Use explicit program names or paths for `ffmpeg` and `ffprobe`.
    pub fn with_programs(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    fn probe_dimensions(&self, path: &Path) -> Result<(u32, u32), String> {
        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height", "-of", "csv=p=0:s=x"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| format!("failed to start {}: {e}", self.ffprobe))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} exited with {}: {}", self.ffprobe, output.status, stderr.trim()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_dimensions(&stdout).ok_or_else(|| format!("no video stream found ({})", stdout.trim()))
    }
}

impl StreamOpener for FfmpegStreamOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSource>, StreamError> {
        let open_error = |reason: String| StreamError::Open {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            return Err(open_error("no such file".to_string()));
        }
        let (width, height) = self.probe_dimensions(path).map_err(open_error)?;

        let child = Command::new(&self.ffmpeg)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "bgr24", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| open_error(format!("failed to start {}: {e}", self.ffmpeg)))?;

        debug!(path = %path.display(), width, height, "Decoding video");
        FfmpegFrameSource::from_child(child, width, height)
            .map(|source| Box::new(source) as Box<dyn FrameSource>)
            .map_err(|e| open_error(e.to_string()))
    }
}

/// Raw `bgr24` frames read from a decoder's stdout.
///
/// Dropping the source kills and reaps the decoder.
pub struct FfmpegFrameSource {
    child: Child,
    stdout: ChildStdout,
    width: u32,
    height: u32,
    finished: bool,
}

impl FfmpegFrameSource {
    fn from_child(mut child: Child, width: u32, height: u32) -> io::Result<Self> {
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::other("decoder stdout was not captured"));
        };
        Ok(Self {
            child,
            stdout,
            width,
            height,
            finished: false,
        })
    }

    /// Reap the decoder and report a non-zero exit as a decode error.
    fn finish(&mut self) -> Result<(), StreamError> {
        self.finished = true;
        let status = self
            .child
            .wait()
            .map_err(|e| StreamError::Decode(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(StreamError::Decode(format!("decoder exited with {status}")))
        }
    }
}

impl FrameSource for FfmpegFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, StreamError> {
        if self.finished {
            return Ok(None);
        }

        let expected = Frame::byte_len(self.width, self.height);
        let mut buffer = vec![0_u8; expected];
        let mut filled = 0;
        while filled < expected {
            match self.stdout.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(StreamError::Decode(e.to_string())),
            }
        }

        if filled == 0 {
            self.finish()?;
            return Ok(None);
        }
        if filled < expected {
            return Err(StreamError::Decode(format!(
                "truncated frame: got {filled} of {expected} bytes"
            )));
        }

        Frame::new(self.width, self.height, PixelLayout::Bgr, buffer)
            .map(Some)
            .map_err(|e| StreamError::Decode(e.to_string()))
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Parse `ffprobe` csv output such as `1920x1080`.
pub fn parse_dimensions(output: &str) -> Option<(u32, u32)> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let (width, height) = line.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().trim_end_matches('x').parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1920x1080\n"), Some((1920, 1080)));
        assert_eq!(parse_dimensions("\n 640x480 \n"), Some((640, 480)));
        assert_eq!(parse_dimensions("640x480x\n"), Some((640, 480)));
        assert_eq!(parse_dimensions(""), None);
        assert_eq!(parse_dimensions("0x480"), None);
        assert_eq!(parse_dimensions("N/A"), None);
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let opener = FfmpegStreamOpener::default();
        let err = opener.open(Path::new("/nonexistent/video.mp4")).err().unwrap();
        assert_eq!(
            err.to_string(),
            "failed to open video: /nonexistent/video.mp4: no such file"
        );
    }

    #[test]
    fn test_missing_ffprobe_fails_to_open() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let opener = FfmpegStreamOpener::with_programs("gpuprobe-no-ffmpeg", "gpuprobe-no-ffprobe");
        let err = opener.open(file.path()).err().unwrap();
        let message = err.to_string();
        assert!(message.starts_with("failed to open video: "), "{message}");
        assert!(message.contains("gpuprobe-no-ffprobe"), "{message}");
    }

    #[cfg(unix)]
    fn fake_decoder(script: &str) -> Child {
        Command::new("sh")
            .args(["-c", script])
            .stdout(Stdio::piped())
            .spawn()
            .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_whole_frames_until_eof() {
        let child = fake_decoder("head -c 24 /dev/zero");
        let mut source = FfmpegFrameSource::from_child(child, 2, 2).unwrap();

        let mut frames = 0;
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.layout(), PixelLayout::Bgr);
            assert_eq!(frame.data().len(), 12);
            frames += 1;
        }
        assert_eq!(frames, 2);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_truncated_frame_is_error() {
        let child = fake_decoder("head -c 20 /dev/zero");
        let mut source = FfmpegFrameSource::from_child(child, 2, 2).unwrap();

        assert!(source.next_frame().unwrap().is_some());
        let err = source.next_frame().unwrap_err();
        assert!(err.to_string().contains("truncated frame"));
    }

    #[cfg(unix)]
    #[test]
    fn test_decoder_failure_is_error() {
        let child = fake_decoder("exit 1");
        let mut source = FfmpegFrameSource::from_child(child, 2, 2).unwrap();

        let err = source.next_frame().unwrap_err();
        assert!(matches!(err, StreamError::Decode(_)));
    }
}
