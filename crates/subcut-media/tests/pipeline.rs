//! End-to-end tests for the pure cutting pipeline: merge -> pad -> silence
//! filter -> filter graph, with no FFmpeg involved.

use subcut_media::{
    apply_padding, build_filter_graph, drop_silenced, merge_short_spans,
};
use subcut_models::{AudioFilterConfig, CutPlan, Interval, SilenceRange};

#[test]
fn pipeline_produces_expected_plan() {
    let spans = vec![
        Interval::new(0.0, 0.3),
        Interval::new(0.5, 0.7),
        Interval::new(3.0, 4.0),
    ];

    let merged = merge_short_spans(&spans, 0.4, 0.3);
    assert_eq!(merged, vec![Interval::new(0.0, 0.7), Interval::new(3.0, 4.0)]);

    let padded = apply_padding(&merged, 0.15, 4.5);
    assert_eq!(
        padded,
        vec![Interval::new(0.0, 0.85), Interval::new(2.85, 4.15)]
    );

    // A silence range covering only part of the second keep-range must not
    // drop it; one swallowing the first entirely must.
    let silences = vec![
        SilenceRange::new(3.9, 4.5),
        SilenceRange::new(0.0, 0.9),
    ];
    let kept = drop_silenced(&padded, &silences);
    assert_eq!(kept, vec![Interval::new(2.85, 4.15)]);

    let plan = CutPlan::new(kept, AudioFilterConfig::default());
    let rendered = build_filter_graph(&plan).expect("non-empty plan");

    assert!(rendered.graph.contains("trim=start=2.850:end=4.150"));
    assert!(rendered.graph.contains("concat=n=1:v=1:a=1"));
    assert!(rendered.graph.contains("highpass=f=80"));
    assert!(rendered.graph.ends_with("[aout]"));
}

#[test]
fn pipeline_everything_silenced_yields_empty_keep_set() {
    let spans = vec![Interval::new(1.0, 2.0), Interval::new(4.0, 5.0)];
    let merged = merge_short_spans(&spans, 0.4, 0.3);
    let padded = apply_padding(&merged, 0.1, 10.0);
    let kept = drop_silenced(&padded, &[SilenceRange::new(0.0, 10.0)]);

    assert!(kept.is_empty());
    assert_eq!(
        build_filter_graph(&CutPlan::new(kept, AudioFilterConfig::default())),
        None
    );
}

#[test]
fn pipeline_without_silences_keeps_every_group() {
    let spans: Vec<Interval> = (0..10)
        .map(|i| Interval::new(i as f64 * 2.0, i as f64 * 2.0 + 1.0))
        .collect();

    let merged = merge_short_spans(&spans, 0.4, 0.3);
    assert_eq!(merged.len(), 10);

    let padded = apply_padding(&merged, 0.15, 20.0);
    let kept = drop_silenced(&padded, &[]);
    assert_eq!(kept.len(), 10);

    let plan = CutPlan::new(kept, AudioFilterConfig::off());
    let rendered = build_filter_graph(&plan).expect("non-empty plan");
    assert!(rendered.graph.contains("concat=n=10:v=1:a=1[vout][aout]"));
}
