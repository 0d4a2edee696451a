mod test_signals;

use approx::assert_abs_diff_eq;
use eegpeaks::config::{AnalysisConfig, BandPassConfig, EdgePolicy, PeakDetectionConfig};
use eegpeaks::processing::SignalProcessor;
use eegpeaks::simulation::{Component, generate_signal};
use eegpeaks::{FrequencyRange, band_pass_filter, find_peaks_parametric};

const TWO_PEAKS: [f64; 10] = [0.0, 1.0, 3.0, 1.0, 0.0, 0.0, 2.0, 4.0, 2.0, 0.0];

fn parametric(minimum_distance: usize, edge: EdgePolicy) -> PeakDetectionConfig {
    PeakDetectionConfig {
        minimum_height: None,
        minimum_distance,
        threshold: Some(0.0),
        edge,
    }
}

#[test]
fn test_two_local_maxima() {
    let peaks = find_peaks_parametric(&TWO_PEAKS, &parametric(1, EdgePolicy::Rising)).unwrap();
    assert_eq!(peaks, vec![2, 7]);
}

#[test]
fn test_taller_peak_suppresses_neighbour() {
    let peaks = find_peaks_parametric(&TWO_PEAKS, &parametric(5, EdgePolicy::Rising)).unwrap();
    assert_eq!(peaks, vec![7]);
}

#[test]
fn test_flat_top_edges() {
    let plateau = [0.0, 1.0, 2.0, 2.0, 2.0, 1.0, 0.0];

    let both = find_peaks_parametric(&plateau, &parametric(1, EdgePolicy::Both)).unwrap();
    assert_eq!(both, vec![2, 4]);

    let none = find_peaks_parametric(&plateau, &parametric(1, EdgePolicy::None)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_bandpass_of_silence_is_silent() {
    let range = FrequencyRange::new(0.5, 30.0).unwrap();
    for len in [3, 64, 1001] {
        let output = band_pass_filter(&vec![0.0; len], range, 100.0).unwrap();
        assert_eq!(output.len(), len);
        assert!(output.iter().all(|&s| s.abs() < 1e-12));
    }
}

#[test]
fn test_bandpass_separates_mixed_tones() {
    let fs = 100.0;
    let n = 1000;
    let input = generate_signal(
        n,
        fs,
        &[
            Component::Sine {
                freq_hz: 10.0,
                amplitude: 1.0,
                phase: 0.0,
            },
            Component::Sine {
                freq_hz: 40.0,
                amplitude: 0.5,
                phase: 0.0,
            },
        ],
    );

    let range = FrequencyRange::new(5.0, 20.0).unwrap();
    let output = band_pass_filter(&input, range, fs).unwrap();

    // The (1 + 1i) bin gain turns sin into sqrt(2) * sin(x + π/4)
    let expected = generate_signal(
        n,
        fs,
        &[Component::Sine {
            freq_hz: 10.0,
            amplitude: 2f64.sqrt(),
            phase: std::f64::consts::FRAC_PI_4,
        }],
    );
    for (out, exp) in output.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(out, exp, epsilon = 1e-9);
    }
}

#[test]
fn test_filter_then_detect() {
    // Slow 2 Hz rhythm under a louder 35 Hz tone
    let fs = 100.0;
    let input = generate_signal(
        1000,
        fs,
        &[
            Component::Sine {
                freq_hz: 2.0,
                amplitude: 1.0,
                phase: 0.0,
            },
            Component::Sine {
                freq_hz: 35.0,
                amplitude: 2.0,
                phase: 0.0,
            },
        ],
    );

    let config = AnalysisConfig {
        parametric: PeakDetectionConfig {
            minimum_distance: 10,
            // Neighbour rises on a smooth sine are far below range / 4
            threshold: Some(0.0),
            ..PeakDetectionConfig::default()
        },
        bandpass: Some(BandPassConfig {
            low_hz: 1.0,
            high_hz: 5.0,
            sampling_frequency: fs,
        }),
        ..AnalysisConfig::default()
    };

    let analysis = SignalProcessor::new(&config).unwrap().process(&input).unwrap();

    // One maximum per cycle over 10 s, 50 samples apart
    assert_eq!(analysis.peaks.len(), 20, "peaks: {:?}", analysis.peaks);
    for interval in analysis.peak_intervals() {
        assert_eq!(interval, 50);
    }
}
