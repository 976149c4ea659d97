//! Cut-plan to FFmpeg filter-graph rendering.
//!
//! Each keep-range becomes a `trim`/`atrim` pair whose local timeline is reset
//! to zero with `setpts`/`asetpts`; all pairs feed one `concat`, and the audio
//! chain (when any stage is enabled) runs once on the concatenated audio.

use std::fmt::Write as _;

use subcut_models::{AudioFilterConfig, CutPlan};

/// A rendered filter graph plus the labels to map into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    /// The `-filter_complex` expression.
    pub graph: String,
    /// Label of the final video stream.
    pub video_out: String,
    /// Label of the final audio stream.
    pub audio_out: String,
}

/// Render a cut plan into a filter graph.
///
/// Returns `None` for an empty plan: there is nothing to concatenate and no
/// valid graph to build.
pub fn build_filter_graph(plan: &CutPlan) -> Option<FilterGraph> {
    if plan.is_empty() {
        return None;
    }

    let mut graph = String::new();

    for (i, span) in plan.keeps.iter().enumerate() {
        let _ = write!(
            graph,
            "[0:v]trim=start={start:.3}:end={end:.3},setpts=PTS-STARTPTS[v{i}];\
             [0:a]atrim=start={start:.3}:end={end:.3},asetpts=PTS-STARTPTS[a{i}];",
            start = span.start,
            end = span.end,
        );
    }

    for i in 0..plan.keeps.len() {
        let _ = write!(graph, "[v{i}][a{i}]");
    }

    let audio_chain = build_audio_chain(&plan.audio);
    let concat_audio_label = if audio_chain.is_some() { "araw" } else { "aout" };
    let _ = write!(
        graph,
        "concat=n={}:v=1:a=1[vout][{concat_audio_label}]",
        plan.keeps.len(),
    );

    if let Some(chain) = audio_chain {
        let _ = write!(graph, ";[araw]{chain}[aout]");
    }

    Some(FilterGraph {
        graph,
        video_out: "[vout]".to_string(),
        audio_out: "[aout]".to_string(),
    })
}

/// Render the audio chain, or `None` when every stage is disabled.
///
/// Stage order is fixed: highpass, lowpass, spectral denoise, echo shaping,
/// speech normalization. A stage whose parameter sits at its off sentinel is
/// omitted entirely rather than emitted with a zero value.
pub fn build_audio_chain(config: &AudioFilterConfig) -> Option<String> {
    let mut stages: Vec<String> = Vec::new();

    if config.highpass_hz > 0.0 {
        stages.push(format!("highpass=f={}", config.highpass_hz));
    }
    if config.lowpass_hz > 0.0 {
        stages.push(format!("lowpass=f={}", config.lowpass_hz));
    }
    if config.denoise_level > 0.0 {
        stages.push(format!("afftdn=nr={}", config.denoise_level));
    }
    if let Some(echo) = &config.echo {
        stages.push(format!(
            "aecho={}:{}:{}:{}",
            echo.in_gain, echo.out_gain, echo.delay_ms, echo.decay
        ));
    }
    if let Some(norm) = &config.speechnorm {
        stages.push(format!("speechnorm=e={}:p={}", norm.expansion, norm.peak));
    }

    if stages.is_empty() {
        None
    } else {
        Some(stages.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subcut_models::{EchoParams, Interval, SpeechNormParams};

    #[test]
    fn test_audio_chain_defaults() {
        let chain = build_audio_chain(&AudioFilterConfig::default()).unwrap();
        assert_eq!(
            chain,
            "highpass=f=80,afftdn=nr=12,aecho=0.8:0.3:40:0.2,speechnorm=e=4:p=0.9"
        );
    }

    #[test]
    fn test_audio_chain_all_off() {
        assert_eq!(build_audio_chain(&AudioFilterConfig::off()), None);
    }

    #[test]
    fn test_audio_chain_zero_is_omitted_not_passed_through() {
        let config = AudioFilterConfig::default().with_highpass_hz(0.0);
        let chain = build_audio_chain(&config).unwrap();
        assert!(!chain.contains("highpass"));
    }

    #[test]
    fn test_audio_chain_stage_order() {
        let config = AudioFilterConfig {
            highpass_hz: 80.0,
            lowpass_hz: 8000.0,
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
        };
        let chain = build_audio_chain(&config).unwrap();
        let highpass = chain.find("highpass").unwrap();
        let lowpass = chain.find("lowpass").unwrap();
        let denoise = chain.find("afftdn").unwrap();
        let echo = chain.find("aecho").unwrap();
        let norm = chain.find("speechnorm").unwrap();
        assert!(highpass < lowpass && lowpass < denoise && denoise < echo && echo < norm);
    }

    #[test]
    fn test_filter_graph_two_segments() {
        let plan = CutPlan::new(
            vec![Interval::new(0.0, 0.85), Interval::new(2.85, 4.15)],
            AudioFilterConfig::off(),
        );
        let rendered = build_filter_graph(&plan).unwrap();
        assert_eq!(
            rendered.graph,
            "[0:v]trim=start=0.000:end=0.850,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=start=0.000:end=0.850,asetpts=PTS-STARTPTS[a0];\
             [0:v]trim=start=2.850:end=4.150,setpts=PTS-STARTPTS[v1];\
             [0:a]atrim=start=2.850:end=4.150,asetpts=PTS-STARTPTS[a1];\
             [v0][a0][v1][a1]concat=n=2:v=1:a=1[vout][aout]"
        );
        assert_eq!(rendered.video_out, "[vout]");
        assert_eq!(rendered.audio_out, "[aout]");
    }

    #[test]
    fn test_filter_graph_appends_audio_chain() {
        let plan = CutPlan::new(
            vec![Interval::new(0.0, 1.0)],
            AudioFilterConfig::off().with_highpass_hz(80.0),
        );
        let rendered = build_filter_graph(&plan).unwrap();
        assert!(rendered
            .graph
            .ends_with("concat=n=1:v=1:a=1[vout][araw];[araw]highpass=f=80[aout]"));
    }

    #[test]
    fn test_filter_graph_empty_plan() {
        let plan = CutPlan::new(Vec::new(), AudioFilterConfig::default());
        assert_eq!(build_filter_graph(&plan), None);
    }

    #[test]
    fn test_filter_graph_pairs_precede_concat() {
        let plan = CutPlan::new(
            vec![Interval::new(1.0, 2.0), Interval::new(3.0, 4.0)],
            AudioFilterConfig::default(),
        );
        let rendered = build_filter_graph(&plan).unwrap();
        // Pairs are interleaved video/audio in chronological order.
        assert!(rendered.graph.contains("[v0][a0][v1][a1]concat=n=2"));
    }
}
