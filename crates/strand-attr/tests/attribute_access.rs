use glam::DVec3;
use strand_attr::{AttrDomain, AttributeInit, CurveComponent, IndexMask, VArray};
use strand_core::{AttrArray, AttrType, AttrValue};
use strand_curve::{BezierSpline, Curve, PolySpline, Spline, SplineBase};

fn poly_spline(count: usize) -> Spline {
    let positions = (0..count).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
    Spline::Poly(PolySpline {
        base: SplineBase::from_positions(positions),
    })
}

fn bezier_spline(count: usize) -> Spline {
    let positions: Vec<DVec3> = (0..count).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
    let left = positions
        .iter()
        .map(|p| *p - DVec3::new(0.3, 0.0, 0.0))
        .collect();
    let right = positions
        .iter()
        .map(|p| *p + DVec3::new(0.3, 0.0, 0.0))
        .collect();
    Spline::Bezier(BezierSpline::new(
        SplineBase::from_positions(positions),
        left,
        right,
    ))
}

fn component_with_sizes(sizes: &[usize]) -> CurveComponent {
    let mut curve = Curve::new();
    for &size in sizes {
        curve.add_spline(poly_spline(size));
    }
    CurveComponent::from_curve(curve)
}

#[test]
fn test_domain_sizes() {
    let component = component_with_sizes(&[3, 2]);
    assert_eq!(component.domain_size(AttrDomain::Point), 5);
    assert_eq!(component.domain_size(AttrDomain::Spline), 2);
}

// Scenario: two splines of sizes [3, 2]; a per-point attribute written as
// [1, 2, 3, 4, 5] reads back identically and reduces to per-spline means
// [2.0, 4.5].
#[test]
fn test_scatter_read_and_reduce() {
    let mut component = component_with_sizes(&[3, 2]);
    assert!(component.attribute_try_create(
        "weight",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Default,
    ));

    let mut lookup = component.attribute_try_get_for_write("weight").unwrap();
    for (i, value) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
        assert!(lookup.attribute.set_value(i, AttrValue::Float(value)));
    }
    lookup.attribute.finish();

    let read = component
        .attribute_try_get_for_read("weight")
        .unwrap()
        .attribute;
    let values: Vec<f64> = (0..5)
        .map(|i| match read.value(i) {
            AttrValue::Float(v) => v,
            other => panic!("unexpected value {:?}", other),
        })
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    let per_spline = component
        .attribute_get_for_read("weight", AttrDomain::Spline)
        .unwrap();
    assert_eq!(per_spline.typed::<f64>().unwrap().to_vec(), vec![2.0, 4.5]);
}

// Scenario: a single straight-segment spline has no handle attributes.
#[test]
fn test_handles_absent_on_poly_spline() {
    let component = component_with_sizes(&[5]);
    assert!(!component.attribute_exists("handle_left"));
    assert!(component.attribute_try_get_for_read("handle_left").is_none());
    assert!(component.attribute_try_get_for_read("handle_right").is_none());
}

// Scenario: resolution writes clamp to a floor of one.
#[test]
fn test_resolution_clamps_to_one() {
    let mut curve = Curve::new();
    curve.add_spline(bezier_spline(3));
    let mut component = CurveComponent::from_curve(curve);

    for bad in [-1, 0] {
        let mut lookup = component.attribute_try_get_for_write("resolution").unwrap();
        assert!(lookup.attribute.set_value(0, AttrValue::Int(bad)));
        lookup.attribute.finish();

        let read = component
            .attribute_try_get_for_read("resolution")
            .unwrap()
            .attribute;
        assert_eq!(read.value(0), AttrValue::Int(1));
    }
}

// Scenario: a layer present on one spline but missing on another fails
// closed for the whole curve. The inconsistent state trips a debug
// assertion, so the absent-result contract is only observable in release
// builds.
#[cfg(not(debug_assertions))]
#[test]
fn test_inconsistent_dynamic_layer_fails_closed() {
    let mut curve = Curve::new();
    curve.add_spline(poly_spline(2));
    curve.add_spline(poly_spline(2));
    curve.splines_mut()[0]
        .attributes_mut()
        .create("weight", AttrType::Float, 2);
    let component = CurveComponent::from_curve(curve);

    assert!(component.attribute_try_get_for_read("weight").is_none());
}

#[test]
fn test_round_trip_every_value_type() {
    let values = [
        AttrValue::Bool(true),
        AttrValue::Int(-7),
        AttrValue::Float(2.5),
        AttrValue::Vec2(glam::DVec2::new(1.0, 2.0)),
        AttrValue::Vec3(DVec3::new(1.0, 2.0, 3.0)),
        AttrValue::Color(glam::DVec4::new(0.1, 0.2, 0.3, 1.0)),
    ];

    for value in values {
        let mut component = component_with_sizes(&[2, 3]);
        let ty = value.data_type();
        let name = format!("layer_{}", ty);
        assert!(component.attribute_try_create(
            &name,
            AttrDomain::Point,
            ty,
            AttributeInit::Default,
        ));

        let mut lookup = component.attribute_try_get_for_write(&name).unwrap();
        for i in 0..5 {
            assert!(lookup.attribute.set_value(i, value));
        }
        lookup.attribute.finish();

        let read = component.attribute_try_get_for_read(&name).unwrap().attribute;
        for i in 0..5 {
            assert_eq!(read.value(i), value, "type {}", ty);
        }
    }
}

#[test]
fn test_full_range_materialize_equals_get() {
    let mut component = component_with_sizes(&[3, 0, 2]);
    let source = AttrArray::from_vec(vec![5, 6, 7, 8, 9]);
    assert!(component.attribute_try_create(
        "ids",
        AttrDomain::Point,
        AttrType::Int,
        AttributeInit::Array(source),
    ));

    let read = component.attribute_try_get_for_read("ids").unwrap().attribute;
    let varray = read.typed::<i32>().unwrap();
    let materialized = varray.to_vec();
    for i in 0..varray.len() {
        assert_eq!(materialized[i], varray.get(i));
    }
    assert_eq!(materialized, vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_partial_materialize_with_sorted_indices() {
    let mut component = component_with_sizes(&[2, 3]);
    let source = AttrArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(component.attribute_try_create(
        "weight",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Array(source),
    ));

    let read = component.attribute_try_get_for_read("weight").unwrap().attribute;
    let varray = read.typed::<f64>().unwrap();
    let mut out = vec![0.0; 5];
    varray.materialize(IndexMask::Indices(&[1, 2, 4]), &mut out);
    assert_eq!(out, vec![0.0, 2.0, 3.0, 0.0, 5.0]);
}

#[test]
fn test_builtin_position_write_updates_evaluated_data() {
    let mut component = component_with_sizes(&[3]);

    // Fill the evaluation cache first so staleness would be visible.
    let before = component.get_for_read().unwrap().splines()[0]
        .evaluated_positions()
        .to_vec();
    assert_eq!(before[0], DVec3::ZERO);

    let mut lookup = component.attribute_try_get_for_write("position").unwrap();
    assert!(lookup
        .attribute
        .set_value(0, AttrValue::Vec3(DVec3::new(0.0, 5.0, 0.0))));
    lookup.attribute.finish();

    let after = component.get_for_read().unwrap().splines()[0].evaluated_positions();
    assert_eq!(after[0], DVec3::new(0.0, 5.0, 0.0));
}

#[test]
fn test_cyclic_write_invalidates_evaluated_length() {
    let mut curve = Curve::new();
    curve.add_spline(bezier_spline(4));
    let mut component = CurveComponent::from_curve(curve);

    let open_len = component.get_for_read().unwrap().splines()[0]
        .evaluated_positions()
        .len();

    let mut lookup = component.attribute_try_get_for_write("cyclic").unwrap();
    assert_eq!(lookup.domain, AttrDomain::Spline);
    assert!(lookup.attribute.set_value(0, AttrValue::Bool(true)));
    lookup.attribute.finish();

    let closed_len = component.get_for_read().unwrap().splines()[0]
        .evaluated_positions()
        .len();
    assert_ne!(open_len, closed_len);
}

#[test]
fn test_handles_on_mixed_kinds_read_zero_and_ignore_writes() {
    let mut curve = Curve::new();
    curve.add_spline(poly_spline(2));
    curve.add_spline(bezier_spline(2));
    let mut component = CurveComponent::from_curve(curve);

    let mut lookup = component.attribute_try_get_for_write("handle_left").unwrap();
    // Writing into the poly spline's range is a no-op.
    assert!(lookup
        .attribute
        .set_value(0, AttrValue::Vec3(DVec3::new(9.0, 9.0, 9.0))));
    assert!(lookup
        .attribute
        .set_value(2, AttrValue::Vec3(DVec3::new(1.0, 1.0, 1.0))));
    lookup.attribute.finish();

    let read = component
        .attribute_try_get_for_read("handle_left")
        .unwrap()
        .attribute;
    assert_eq!(read.value(0), AttrValue::Vec3(DVec3::ZERO));
    assert_eq!(read.value(2), AttrValue::Vec3(DVec3::new(1.0, 1.0, 1.0)));
}

#[test]
fn test_create_single_spline_adopts_column() {
    let mut component = component_with_sizes(&[4]);
    let source = AttrArray::from_vec(vec![10, 20, 30, 40]);
    assert!(component.attribute_try_create(
        "ids",
        AttrDomain::Point,
        AttrType::Int,
        AttributeInit::Array(source),
    ));

    let read = component.attribute_try_get_for_read("ids").unwrap().attribute;
    // Single spline: the read comes back as the bare adopted span.
    assert!(read.typed::<i32>().unwrap().as_span().is_some());
    assert_eq!(read.typed::<i32>().unwrap().to_vec(), vec![10, 20, 30, 40]);
}

#[test]
fn test_create_rejects_duplicates_and_wrong_domain() {
    let mut component = component_with_sizes(&[2]);
    assert!(component.attribute_try_create(
        "weight",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Default,
    ));
    assert!(!component.attribute_try_create(
        "weight",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Default,
    ));
    // Builtins cannot be shadowed by a custom layer of another shape.
    assert!(!component.attribute_try_create(
        "position",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Default,
    ));
}

#[test]
fn test_builtin_id_create_and_delete() {
    let mut component = component_with_sizes(&[2, 2]);
    assert!(!component.attribute_exists("id"));
    assert!(component.attribute_try_create(
        "id",
        AttrDomain::Point,
        AttrType::Int,
        AttributeInit::Default,
    ));
    assert!(component.attribute_exists("id"));

    let mut lookup = component.attribute_try_get_for_write("id").unwrap();
    assert!(lookup.attribute.set_value(3, AttrValue::Int(77)));
    lookup.attribute.finish();
    let read = component.attribute_try_get_for_read("id").unwrap().attribute;
    assert_eq!(read.value(3), AttrValue::Int(77));

    assert!(component.attribute_try_delete("id"));
    assert!(!component.attribute_exists("id"));
    assert!(!component.attribute_try_delete("id"));
}

#[test]
fn test_spline_domain_custom_attribute() {
    let mut component = component_with_sizes(&[2, 3]);
    let source = AttrArray::from_vec(vec![true, false]);
    assert!(component.attribute_try_create(
        "selected",
        AttrDomain::Spline,
        AttrType::Bool,
        AttributeInit::Array(source),
    ));

    let lookup = component.attribute_try_get_for_read("selected").unwrap();
    assert_eq!(lookup.domain, AttrDomain::Spline);
    assert_eq!(lookup.attribute.len(), 2);

    // Broadcast onto points: every point reads its spline's flag.
    let on_points = component
        .attribute_get_for_read("selected", AttrDomain::Point)
        .unwrap();
    assert_eq!(
        on_points.typed::<bool>().unwrap().to_vec(),
        vec![true, true, false, false, false]
    );
}

#[test]
fn test_write_through_shared_component_copies() {
    let mut a = component_with_sizes(&[2]);
    let b = a.clone();

    let mut lookup = a.attribute_try_get_for_write("radius").unwrap();
    assert!(lookup.attribute.set_value(0, AttrValue::Float(3.0)));
    lookup.attribute.finish();

    let a_radius = a.attribute_try_get_for_read("radius").unwrap().attribute;
    assert_eq!(a_radius.value(0), AttrValue::Float(3.0));
    let b_radius = b.attribute_try_get_for_read("radius").unwrap().attribute;
    assert_eq!(b_radius.value(0), AttrValue::Float(1.0));
}

#[test]
fn test_attribute_list_covers_all_layers() {
    let mut component = component_with_sizes(&[2, 2]);
    component.attribute_try_create(
        "weight",
        AttrDomain::Point,
        AttrType::Float,
        AttributeInit::Default,
    );
    component.attribute_try_create(
        "selected",
        AttrDomain::Spline,
        AttrType::Bool,
        AttributeInit::Default,
    );

    let list = component.attribute_list();
    let names: Vec<&str> = list.iter().map(|meta| meta.name.as_str()).collect();
    for expected in ["cyclic", "position", "radius", "resolution", "selected", "tilt", "weight"] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    // Not present: handles (no Bezier splines) and id (never created).
    assert!(!names.contains(&"handle_left"));
    assert!(!names.contains(&"id"));
}

#[test]
fn test_read_adapters_missing_attribute_absent() {
    let component = component_with_sizes(&[3]);
    assert!(component.attribute_try_get_for_read("nope").is_none());
    assert!(component
        .attribute_get_for_read("nope", AttrDomain::Spline)
        .is_none());
}

#[test]
fn test_broadcast_adapter_is_lazy_span_free() {
    let mut component = component_with_sizes(&[3, 1]);
    let source = AttrArray::from_vec(vec![2, 8]);
    assert!(component.attribute_try_create(
        "group",
        AttrDomain::Spline,
        AttrType::Int,
        AttributeInit::Array(source),
    ));

    let on_points = component
        .attribute_get_for_read("group", AttrDomain::Point)
        .unwrap();
    let varray = on_points.typed::<i32>().unwrap();
    assert!(matches!(varray, VArray::Broadcast { .. }));
    assert_eq!(varray.get(2), 2);
    assert_eq!(varray.get(3), 8);
}

#[test]
fn test_empty_curve_has_no_attributes() {
    let component = CurveComponent::from_curve(Curve::new());
    assert!(!component.attribute_exists("position"));
    assert!(component.attribute_try_get_for_read("position").is_none());
    assert_eq!(component.attribute_list(), Vec::new());
}

#[test]
fn test_normals_attribute_shapes() {
    let mut curve = Curve::new();
    curve.add_spline(poly_spline(3));
    curve.add_spline(bezier_spline(2));
    let component = CurveComponent::from_curve(curve);

    let points = strand_attr::curve_normals(&component, AttrDomain::Point).unwrap();
    assert_eq!(points.len(), 5);

    let splines = strand_attr::curve_normals(&component, AttrDomain::Spline).unwrap();
    assert_eq!(splines.len(), 2);
}

#[test]
fn test_read_attribute_to_array_snapshot() {
    let mut component = component_with_sizes(&[2, 1]);
    let mut lookup = component.attribute_try_get_for_write("tilt").unwrap();
    for i in 0..3 {
        assert!(lookup.attribute.set_value(i, AttrValue::Float(i as f64)));
    }
    lookup.attribute.finish();

    let read = component.attribute_try_get_for_read("tilt").unwrap().attribute;
    let snapshot = read.to_array();
    assert_eq!(snapshot.as_slice::<f64>().unwrap(), &[0.0, 1.0, 2.0]);
}

#[test]
fn test_empty_attribute_array_check() {
    // A read over an attribute with zero points adapts to absent.
    let component = component_with_sizes(&[0]);
    assert!(component
        .attribute_get_for_read("radius", AttrDomain::Spline)
        .is_none());
    // The underlying lookup is also absent: point builtins require points.
    assert!(component.attribute_try_get_for_read("radius").is_none());
}

#[test]
fn test_scenario_b_missing_layer_exists_check() {
    let component = component_with_sizes(&[5]);
    // "id" is custom-data backed; without the layer it does not exist even
    // though the curve has points.
    assert!(!component.attribute_exists("id"));
    assert!(component.attribute_try_get_for_read("id").is_none());
}
