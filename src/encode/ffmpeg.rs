use crate::encode::sink::{CaptureConfig, CaptureStream, Container};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::premul_rgba8;
use std::io::Read;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread::JoinHandle;

/// Size of each read from the encoder's stdout.
const CHUNK_BYTES: usize = 64 * 1024;

/// Options for [`FfmpegCapture`].
#[derive(Clone, Debug)]
pub struct FfmpegCaptureOpts {
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// x264 preset.
    pub preset: String,
}

impl Default for FfmpegCaptureOpts {
    fn default() -> Self {
        Self {
            bg_rgba: [255, 255, 255, 255],
            preset: "veryfast".to_owned(),
        }
    }
}

/// Capture stream that spawns the system `ffmpeg`, writes raw frames to its stdin and collects
/// fragmented MP4 bytes from its stdout as they are produced.
pub struct FfmpegCapture {
    opts: FfmpegCaptureOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    chunks: Option<Receiver<Vec<u8>>>,
    stdout_reader: Option<JoinHandle<std::io::Result<()>>>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<CaptureConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegCapture {
    /// Create an idle capture; `ffmpeg` is spawned in `begin`.
    pub fn new(opts: FfmpegCaptureOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            chunks: None,
            stdout_reader: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    fn drain_ready(&mut self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        if let Some(rx) = self.chunks.as_ref() {
            loop {
                match rx.try_recv() {
                    Ok(chunk) => out.push(chunk),
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            }
        }
        out
    }

    fn join_stderr(&mut self) -> StoryResult<Vec<u8>> {
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| StoryError::capture("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| StoryError::capture(format!("ffmpeg stderr read failed: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

impl CaptureStream for FfmpegCapture {
    fn container(&self) -> Container {
        Container::MP4
    }

    fn begin(&mut self, cfg: CaptureConfig) -> StoryResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(StoryError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StoryError::validation(
                "capture width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(StoryError::validation(
                "capture width/height must be even (required for yuv420p output)",
            ));
        }
        if !is_ffmpeg_on_path() {
            return Err(StoryError::capture(
                "ffmpeg is required for video capture, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Input: flattened opaque RGBA8 frames (see push_frame).
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);
        // Output: fragmented mp4 so bytes can be emitted before the sweep ends.
        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-preset",
            &self.opts.preset,
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "frag_keyframe+empty_moov+default_base_moof",
            "-f",
            "mp4",
            "pipe:1",
        ]);

        let mut child = cmd.spawn().map_err(|e| {
            StoryError::capture(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StoryError::capture("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| StoryError::capture("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StoryError::capture("failed to open ffmpeg stderr (unexpected)"))?;

        let (tx, rx) = channel();
        let stdout_reader = std::thread::spawn(move || {
            let mut buf = vec![0u8; CHUNK_BYTES];
            loop {
                let n = stdout.read(&mut buf)?;
                if n == 0 {
                    return Ok(());
                }
                if tx.send(buf[..n].to_vec()).is_err() {
                    return Ok(());
                }
            }
        });
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(width = cfg.width, height = cfg.height, "ffmpeg capture started");
        self.scratch = vec![0u8; (cfg.width * cfg.height * 4) as usize];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.chunks = Some(rx);
        self.stdout_reader = Some(stdout_reader);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StoryResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StoryError::capture("ffmpeg capture not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(StoryError::capture(
                "ffmpeg capture received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(StoryError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(StoryError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_over_bg_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StoryError::capture("ffmpeg capture is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            StoryError::capture(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn take_chunks(&mut self) -> StoryResult<Vec<Vec<u8>>> {
        Ok(self.drain_ready())
    }

    fn stop(&mut self) -> StoryResult<Vec<Vec<u8>>> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| StoryError::capture("ffmpeg capture not started"))?;

        // Read stdout to EOF before waiting so ffmpeg never blocks on a full pipe.
        if let Some(reader) = self.stdout_reader.take() {
            reader
                .join()
                .map_err(|_| StoryError::capture("ffmpeg stdout reader thread panicked"))?
                .map_err(|e| StoryError::capture(format!("ffmpeg stdout read failed: {e}")))?;
        }
        let status = child.wait().map_err(|e| {
            StoryError::capture(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let rest = self.drain_ready();
        self.chunks = None;
        let stderr_bytes = self.join_stderr()?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StoryError::capture(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(rest)
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "ffmpeg already exited");
            }
            let _ = child.wait();
        }
        if let Some(reader) = self.stdout_reader.take() {
            let _ = reader.join();
        }
        self.chunks = None;
        let _ = self.join_stderr();
        self.cfg = None;
    }
}

impl Drop for FfmpegCapture {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // `-r` before `-i` sets the rawvideo input rate.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn flatten_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> StoryResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StoryError::validation(
            "flatten_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let [bg_r, bg_g, bg_b, _] = premul_rgba8(bg_rgba[0], bg_rgba[1], bg_rgba[2], 255);
    let (bg_r, bg_g, bg_b) = (u16::from(bg_r), u16::from(bg_g), u16::from(bg_b));

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if src_is_premul {
            (
                s[0] as u16 + mul_div255_u16(bg_r, inv),
                s[1] as u16 + mul_div255_u16(bg_g, inv),
                s[2] as u16 + mul_div255_u16(bg_b, inv),
            )
        } else {
            (
                mul_div255_u16(s[0] as u16, a) + mul_div255_u16(bg_r, inv),
                mul_div255_u16(s[1] as u16, a) + mul_div255_u16(bg_g, inv),
                mul_div255_u16(s[2] as u16, a) + mul_div255_u16(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
