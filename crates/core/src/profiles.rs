//! Static encoding profiles and the adaptive ladder.
//!
//! Pure data, shared read-only across all concurrent pipeline runs.
//! The two container presets trade off broad device compatibility
//! (H.264/AAC) against open-web delivery (VP9/Opus); the ladder is a
//! fixed four-rung progression from mobile to HD.

/// Codec/quality parameters for one container transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingProfile {
    /// Video codec passed to `-c:v`.
    pub video_codec: &'static str,
    /// Audio codec passed to `-c:a`.
    pub audio_codec: &'static str,
    /// Constant rate factor.
    pub crf: u32,
    /// Encoder preset (`-preset`), x264 family only.
    pub preset: Option<&'static str>,
    /// Target video bitrate (`-b:v`); `Some(0)` means CRF-driven VP9.
    pub video_bitrate: Option<u32>,
    /// VP9 `-cpu-used` speed/quality knob.
    pub cpu_used: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate_kbps: u32,
}

/// Broad-compatibility H.264/AAC preset.
pub const MP4_PROFILE: EncodingProfile = EncodingProfile {
    video_codec: "libx264",
    audio_codec: "aac",
    crf: 22,
    preset: Some("veryfast"),
    video_bitrate: None,
    cpu_used: None,
    audio_bitrate_kbps: 160,
};

/// Open-web VP9/Opus preset. `b:v 0` with CRF gives constrained
/// quality mode.
pub const WEBM_PROFILE: EncodingProfile = EncodingProfile {
    video_codec: "libvpx-vp9",
    audio_codec: "libopus",
    crf: 32,
    preset: None,
    video_bitrate: Some(0),
    cpu_used: Some(4),
    audio_bitrate_kbps: 128,
};

/// One rung of the adaptive-bitrate ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderRendition {
    /// Target frame width in pixels.
    pub width: u32,
    /// Target frame height in pixels.
    pub height: u32,
    /// Target video bitrate in kbps.
    pub video_bitrate_kbps: u32,
    /// Target audio bitrate in kbps.
    pub audio_bitrate_kbps: u32,
}

impl LadderRendition {
    /// Approximate delivery bandwidth in bits per second, for the
    /// master playlist's `BANDWIDTH` attribute. Combined stream
    /// bitrate plus 10% container/mux overhead.
    pub fn approx_bandwidth(&self) -> u64 {
        let stream_bps = u64::from(self.video_bitrate_kbps + self.audio_bitrate_kbps) * 1000;
        stream_bps + stream_bps / 10
    }

    /// Per-rendition playlist filename, e.g. `360p.m3u8`.
    pub fn playlist_name(&self) -> String {
        format!("{}p.m3u8", self.height)
    }

    /// Segment filename pattern, e.g. `360p_%03d.ts`.
    pub fn segment_pattern(&self) -> String {
        format!("{}p_%03d.ts", self.height)
    }
}

/// The fixed adaptive ladder, ordered low to high.
pub const HLS_LADDER: [LadderRendition; 4] = [
    LadderRendition {
        width: 426,
        height: 240,
        video_bitrate_kbps: 400,
        audio_bitrate_kbps: 96,
    },
    LadderRendition {
        width: 640,
        height: 360,
        video_bitrate_kbps: 800,
        audio_bitrate_kbps: 96,
    },
    LadderRendition {
        width: 854,
        height: 480,
        video_bitrate_kbps: 1400,
        audio_bitrate_kbps: 128,
    },
    LadderRendition {
        width: 1280,
        height: 720,
        video_bitrate_kbps: 2800,
        audio_bitrate_kbps: 128,
    },
];

/// Audio bitrate for the standalone audio extract, in kbps.
pub const AUDIO_EXTRACT_BITRATE_KBPS: u32 = 160;

/// HLS segment duration in seconds.
pub const HLS_SEGMENT_SECS: u32 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_ordered_low_to_high() {
        for pair in HLS_LADDER.windows(2) {
            assert!(pair[0].height < pair[1].height);
            assert!(pair[0].video_bitrate_kbps < pair[1].video_bitrate_kbps);
        }
    }

    #[test]
    fn test_approx_bandwidth() {
        let rung = HLS_LADDER[3];
        // (2800 + 128) kbps -> 2_928_000 bps + 10% overhead
        assert_eq!(rung.approx_bandwidth(), 3_220_800);
    }

    #[test]
    fn test_rendition_names() {
        let rung = HLS_LADDER[1];
        assert_eq!(rung.playlist_name(), "360p.m3u8");
        assert_eq!(rung.segment_pattern(), "360p_%03d.ts");
    }

    #[test]
    fn test_container_profiles() {
        assert_eq!(MP4_PROFILE.video_codec, "libx264");
        assert_eq!(MP4_PROFILE.preset, Some("veryfast"));
        assert_eq!(WEBM_PROFILE.video_bitrate, Some(0));
        assert_eq!(WEBM_PROFILE.cpu_used, Some(4));
    }
}
