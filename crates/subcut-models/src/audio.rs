//! Audio post-filter configuration.
//!
//! Each stage of the audio chain has an "off" sentinel: `0` for the scalar
//! stages, `None` for the parameter groups. A disabled stage must not appear
//! in the emitted filter chain at all.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Echo/reverb shaping parameters (FFmpeg `aecho`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EchoParams {
    /// Input gain of the reflected signal (0.0-1.0).
    pub in_gain: f64,
    /// Output gain of the reflected signal (0.0-1.0).
    pub out_gain: f64,
    /// Delay of the reflection in milliseconds.
    pub delay_ms: f64,
    /// Decay of the reflection (0.0-1.0).
    pub decay: f64,
}

impl FromStr for EchoParams {
    type Err = String;

    /// Parse the `in:out:delay:decay` colon form used by the CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 4 {
            return Err(format!("expected in:out:delay:decay, got '{s}'"));
        }
        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| format!("invalid echo parameter '{part}'"))?;
        }
        Ok(Self {
            in_gain: values[0],
            out_gain: values[1],
            delay_ms: values[2],
            decay: values[3],
        })
    }
}

/// Speech level normalization parameters (FFmpeg `speechnorm`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechNormParams {
    /// Maximum expansion factor (`e`).
    pub expansion: f64,
    /// Peak target (`p`, 0.0-1.0).
    pub peak: f64,
}

/// Configuration for the audio chain applied once to the concatenated audio.
///
/// Stage order is fixed and meaningful:
/// highpass -> lowpass -> spectral denoise -> echo shaping -> speech
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFilterConfig {
    /// Highpass cutoff in Hz. `0` disables the stage.
    pub highpass_hz: f64,
    /// Lowpass cutoff in Hz. `0` disables the stage.
    pub lowpass_hz: f64,
    /// FFT denoise amount (`afftdn` nr). `0` disables the stage.
    pub denoise_level: f64,
    /// Echo shaping. `None` disables the stage.
    pub echo: Option<EchoParams>,
    /// Speech normalization. `None` disables the stage.
    pub speechnorm: Option<SpeechNormParams>,
}

impl Default for AudioFilterConfig {
    fn default() -> Self {
        Self {
            highpass_hz: 80.0,
            lowpass_hz: 0.0,
            denoise_level: 12.0,
            echo: Some(EchoParams {
                in_gain: 0.8,
                out_gain: 0.3,
                delay_ms: 40.0,
                decay: 0.2,
            }),
            speechnorm: Some(SpeechNormParams {
                expansion: 4.0,
                peak: 0.9,
            }),
        }
    }
}

impl AudioFilterConfig {
    /// A configuration with every stage disabled (pass-through audio).
    pub fn off() -> Self {
        Self {
            highpass_hz: 0.0,
            lowpass_hz: 0.0,
            denoise_level: 0.0,
            echo: None,
            speechnorm: None,
        }
    }

    /// Whether every stage is disabled.
    pub fn is_empty(&self) -> bool {
        self.highpass_hz <= 0.0
            && self.lowpass_hz <= 0.0
            && self.denoise_level <= 0.0
            && self.echo.is_none()
            && self.speechnorm.is_none()
    }

    /// Builder-style setter for the highpass cutoff.
    pub fn with_highpass_hz(mut self, hz: f64) -> Self {
        self.highpass_hz = hz.max(0.0);
        self
    }

    /// Builder-style setter for the lowpass cutoff.
    pub fn with_lowpass_hz(mut self, hz: f64) -> Self {
        self.lowpass_hz = hz.max(0.0);
        self
    }

    /// Builder-style setter for the denoise amount.
    pub fn with_denoise_level(mut self, level: f64) -> Self {
        self.denoise_level = level.max(0.0);
        self
    }

    /// Builder-style setter for the echo stage.
    pub fn with_echo(mut self, echo: Option<EchoParams>) -> Self {
        self.echo = echo;
        self
    }

    /// Builder-style setter for the speechnorm stage.
    pub fn with_speechnorm(mut self, speechnorm: Option<SpeechNormParams>) -> Self {
        self.speechnorm = speechnorm;
        self
    }
}
