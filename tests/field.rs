mod common;

use common::{assert_close, machine_catalog};
use fieldaxes::data::{Axis, Field, FieldStats, Normalization};
use fieldaxes::selection::{
    Action, AxisCatalog, AxisSelectionRequest, ExtractionRequest, Reduction,
};
use fieldaxes::{FieldAxesError, LabelConfig};
use ndarray::{array, ArrayD, IxDyn};
use std::f64::consts::TAU;

/// 2 x 3 field: values 1..=6 over time (rows) and z (columns).
fn grid() -> Field {
    Field::from_vec(
        "B",
        "T",
        vec![
            Axis::new("time", "s", array![0.0, 1.0]),
            Axis::new("z", "m", array![0.0, 1.0, 2.0])
                .with_normalization("z_id", Normalization::Indices),
        ],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )
    .unwrap()
}

fn along(field: &Field, requests: &[&str]) -> fieldaxes::Result<fieldaxes::data::AlongResult> {
    field.get_along(requests, &LabelConfig::default())
}

fn flat(values: &ArrayD<f64>) -> Vec<f64> {
    values.iter().copied().collect()
}

#[test]
fn shape_must_match_axes() {
    let axes = vec![Axis::new("z", "m", array![0.0, 1.0])];
    assert!(matches!(
        Field::new("B", "T", axes.clone(), ArrayD::zeros(IxDyn(&[3]))),
        Err(FieldAxesError::Shape(_))
    ));
    assert!(Field::from_vec("B", "T", axes, vec![1.0]).is_err());
}

#[test]
fn slice_keeps_other_axis() {
    let field = grid();
    let result = along(&field, &["time{s}", "z[1]"]).unwrap();

    assert_eq!(result.values.shape(), [2]);
    assert_eq!(flat(&result.values), [2.0, 5.0]);
    assert_eq!(result.axes.len(), 1);
    assert_eq!(result.axes[0].name, "time");
    assert_eq!(result.slices[0].name, "z");
    assert_eq!(result.slices[0].index, 1);
    assert_close(result.slices[0].value, 1.0);
    assert_eq!(result.unit, "T");
}

#[test]
fn negative_slice_counts_from_end() {
    let field = grid();
    let result = along(&field, &["z[-1]"]).unwrap();
    assert_eq!(flat(&result.values), [3.0, 6.0]);
    assert_eq!(result.slices[0].index, 2);
}

#[test]
fn both_axes_sliced_leaves_scalar() {
    let field = grid();
    let result = along(&field, &["time[1]", "z[0]"]).unwrap();
    assert_eq!(result.values.ndim(), 0);
    assert_eq!(flat(&result.values), [4.0]);
    let names: Vec<&str> = result.slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["time", "z"]);
}

#[test]
fn reductions() {
    let field = grid();

    let sum = along(&field, &["time=sum", "z{mm}"]).unwrap();
    assert_eq!(flat(&sum.values), [5.0, 7.0, 9.0]);
    assert_eq!(sum.axis("z").map(|a| a.unit.as_str()), Some("mm"));
    assert_eq!(sum.axis("z").map(|a| a.values.to_vec()), Some(vec![0.0, 1000.0, 2000.0]));
    assert_eq!(sum.reductions, [("time".to_string(), Reduction::Sum)]);

    let mean = along(&field, &["time{s}", "z=mean"]).unwrap();
    assert_eq!(flat(&mean.values), [2.0, 5.0]);

    let rms = along(&field, &["time=rms"]).unwrap();
    let expected = [8.5f64.sqrt(), 14.5f64.sqrt(), 22.5f64.sqrt()];
    for (&got, want) in rms.values.iter().zip(expected) {
        assert_close(got, want);
    }

    let rss = along(&field, &["z=rss"]).unwrap();
    let expected = [14.0f64.sqrt(), 77.0f64.sqrt()];
    for (&got, want) in rss.values.iter().zip(expected) {
        assert_close(got, want);
    }
}

#[test]
fn list_keeps_selected_indices() {
    let field = grid();
    let result = along(&field, &["z[0,-1]"]).unwrap();

    assert_eq!(result.values.shape(), [2, 2]);
    assert_eq!(flat(&result.values), [1.0, 3.0, 4.0, 6.0]);
    assert_eq!(result.axis("z").map(|a| a.values.to_vec()), Some(vec![0.0, 2.0]));
}

#[test]
fn unmentioned_axes_kept_whole() {
    let field = grid();
    let result = along(&field, &[]).unwrap();
    assert_eq!(result.values.shape(), [2, 3]);
    assert_eq!(result.axes.len(), 2);
    assert_eq!(result.stats().valid_count, 6);
}

#[test]
fn normalized_plot_axis() {
    let field = grid();
    let result = along(&field, &["z->z_id"]).unwrap();
    let z = result.axis("z").unwrap();
    assert_eq!(z.unit, "z_id");
    assert_eq!(z.values.to_vec(), [0.0, 1.0, 2.0]);

    assert!(matches!(
        along(&field, &["time->tooth_id"]),
        Err(FieldAxesError::UnknownNormalization { .. })
    ));
}

#[test]
fn request_errors() {
    let field = grid();
    assert!(matches!(
        along(&field, &["z[0]", "z=sum"]),
        Err(FieldAxesError::InvalidRequest { .. })
    ));
    assert!(matches!(
        along(&field, &["mass[0]"]),
        Err(FieldAxesError::UnknownAxis { .. })
    ));
    assert!(matches!(
        along(&field, &["z{s}"]),
        Err(FieldAxesError::UnitMismatch { .. })
    ));
    assert!(matches!(
        along(&field, &["z[3]"]),
        Err(FieldAxesError::IndexOutOfRange { index: 3, len: 3, .. })
    ));
    assert!(matches!(
        along(&field, &["time{s}", "freqs{Hz}"]),
        Err(FieldAxesError::InvalidRequest { .. })
    ));
}

#[test]
fn cosine_spectrum_peaks_on_its_harmonic() {
    let field = Field::synthetic(
        "B",
        "T",
        vec![
            Axis::periodic("time", "s", 0.0, 1.0, 16),
            Axis::periodic("angle", "rad", 0.0, TAU, 8),
        ],
    );

    let spectrum = along(&field, &["freqs{Hz}", "angle[0]"]).unwrap();
    let freqs = spectrum.axis("freqs").unwrap();
    assert_eq!(freqs.values.len(), 9);
    assert_close(freqs.values[1], 1.0);
    for (k, &amplitude) in spectrum.values.iter().enumerate() {
        assert_close(amplitude, if k == 1 { 1.0 } else { 0.0 });
    }

    let spatial = along(&field, &["wavenumber{}", "time[0]"]).unwrap();
    assert_eq!(spatial.values.len(), 5);
    for (k, &amplitude) in spatial.values.iter().enumerate() {
        assert_close(amplitude, if k == 2 { 1.0 } else { 0.0 });
    }
}

#[test]
fn fourier_slice_picks_spectrum_bin() {
    let field = Field::synthetic(
        "B",
        "T",
        vec![
            Axis::periodic("time", "s", 0.0, 1.0, 16),
            Axis::periodic("angle", "rad", 0.0, TAU, 8),
        ],
    );
    let result = along(&field, &["angle{°}", "freqs[1]"]).unwrap();
    assert_eq!(result.slices[0].name, "freqs");
    assert_close(result.slices[0].value, 1.0);
    assert_eq!(result.slices[0].unit, "Hz");
    assert_close(flat(&result.values)[0], 1.0);
}

#[test]
fn base_axis_of_spectrum_unavailable() {
    let field = Field::from_vec(
        "B",
        "T",
        vec![Axis::new("freqs", "Hz", array![0.0, 50.0])],
        vec![1.0, 0.5],
    )
    .unwrap();
    assert!(matches!(
        along(&field, &["time[0]"]),
        Err(FieldAxesError::TransformUnavailable { .. })
    ));
    assert_eq!(flat(&along(&field, &["freqs[1]"]).unwrap().values), [0.5]);
}

#[test]
fn uneven_axis_has_no_spectrum() {
    let field = Field::from_vec(
        "B",
        "T",
        vec![Axis::new("time", "s", array![0.0, 1.0, 3.0])],
        vec![1.0, 2.0, 3.0],
    )
    .unwrap();
    assert!(matches!(
        along(&field, &["freqs"]),
        Err(FieldAxesError::TransformUnavailable { .. })
    ));
}

#[test]
fn stats_skip_non_finite() {
    let values = ArrayD::from_shape_vec(IxDyn(&[4]), vec![1.0, 2.0, 3.0, f64::NAN]).unwrap();
    let stats = FieldStats::compute(&values);
    assert_eq!(stats.min_max, Some((1.0, 3.0)));
    assert_eq!(stats.mean, Some(2.0));
    assert_eq!(stats.std, Some(1.0));
    assert_eq!(stats.valid_count, 3);

    let empty = ArrayD::from_shape_vec(IxDyn(&[1]), vec![f64::NAN]).unwrap();
    assert_eq!(FieldStats::compute(&empty), FieldStats::default());
}

#[test]
fn selection_requests_drive_extraction() {
    let catalog = machine_catalog();
    let field = Field::synthetic("B", "T", catalog.axes().to_vec());

    let mut x = AxisSelectionRequest::new(&catalog, "X");
    x.select_action(Action::Fft);
    let mut y = AxisSelectionRequest::new(&catalog, "Y");
    y.remove_axis(x.tag().unwrap());
    y.select_axis("z").unwrap();

    let mut requests = vec![x.to_request(), y.to_request()];
    for axis in catalog.axes() {
        if axis.name == "time" || axis.name == "z" {
            continue;
        }
        let cut = ExtractionRequest::from_spec(&catalog, axis, "single", &[0]).unwrap();
        requests.extend(cut.format());
    }
    assert_eq!(
        requests,
        ["freqs{Hz}", "z{m}", "angle[0]{°}", "phase[0]{}", "slot[0]{}"]
    );

    let refs: Vec<&str> = requests.iter().map(String::as_str).collect();
    let result = field.get_along(&refs, catalog.labels()).unwrap();
    assert_eq!(result.values.shape(), [6, 3]);
    let names: Vec<&str> = result.axes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["freqs", "z"]);
    assert_eq!(result.slices.len(), 3);
}

#[test]
fn catalog_from_field() {
    let field = grid();
    let catalog = AxisCatalog::from_field(&field, LabelConfig::default());
    assert_eq!(catalog.axes().len(), 2);
    assert_eq!(catalog.axis_for("freqs").map(|a| a.name.as_str()), Some("time"));
}

#[test]
fn ratio_and_vector_normalizations() {
    let field = Field::synthetic(
        "B",
        "T",
        vec![
            Axis::periodic("time", "s", 0.0, 1.0, 16)
                .with_normalization("elec_order", Normalization::Ratio(2.0)),
            Axis::new("z", "m", array![0.0, 0.5, 1.0])
                .with_normalization("slice_pos", Normalization::Vector(vec![10.0, 20.0, 30.0])),
        ],
    );

    let orders = along(&field, &["freqs->elec_order", "z[0]"]).unwrap();
    let freqs = orders.axis("freqs").unwrap();
    assert_eq!(freqs.unit, "elec_order");
    assert_close(freqs.values[2], 1.0);

    let positions = along(&field, &["z->slice_pos", "time[0]"]).unwrap();
    assert_eq!(positions.axis("z").map(|a| a.values.to_vec()), Some(vec![10.0, 20.0, 30.0]));
}
