//! Tests for running the reconstructor as a pipeline stage

use std::sync::{Arc, Mutex};
use std::thread;
use tablet_reconstructor::config::Properties;
use tablet_reconstructor::filters::exponential::ExponentialSmoother;
use tablet_reconstructor::filters::PositionFilter;
use tablet_reconstructor::pipeline::{
    parse_report_line, AuxReport, DeviceReport, FnSink, PipelineElement, PipelinePosition, ReconstructorElement,
    TabletReport,
};
use tablet_reconstructor::{Error, Sample};

#[test]
fn test_non_position_fields_preserved() {
    let mut element = ReconstructorElement::default();
    let mut out: Vec<DeviceReport> = Vec::new();

    let first = TabletReport {
        position: Sample::new(0.0, 0.0),
        pressure: 512,
        buttons: vec![true, false],
    };
    let second = TabletReport {
        position: Sample::new(10.0, 0.0),
        pressure: 900,
        buttons: vec![false, true],
    };
    element.consume(DeviceReport::Tablet(first.clone()), &mut out);
    element.consume(DeviceReport::Tablet(second.clone()), &mut out);

    assert_eq!(out[0], DeviceReport::Tablet(first));
    match &out[1] {
        DeviceReport::Tablet(report) => {
            assert_eq!(report.position, Sample::new(20.0, 0.0));
            assert_eq!(report.pressure, second.pressure);
            assert_eq!(report.buttons, second.buttons);
        }
        other => panic!("report type changed: {other:?}"),
    }
}

#[test]
fn test_mixed_stream_forwarded_in_order() {
    let mut element = ReconstructorElement::default();
    let mut out: Vec<DeviceReport> = Vec::new();

    let stream = vec![
        DeviceReport::at(Sample::new(0.0, 0.0)),
        DeviceReport::Auxiliary(AuxReport { buttons: vec![true] }),
        DeviceReport::Raw(vec![0x02, 0xff]),
        DeviceReport::at(Sample::new(5.0, 5.0)),
        DeviceReport::OutOfRange,
    ];
    for report in stream.clone() {
        element.consume(report, &mut out);
    }

    assert_eq!(out.len(), stream.len());
    assert_eq!(out[1], stream[1]);
    assert_eq!(out[2], stream[2]);
    assert_eq!(out[3].position(), Some(Sample::new(10.0, 10.0)));
    assert_eq!(out[4], DeviceReport::OutOfRange);
}

#[test]
fn test_property_change_between_reports() {
    let mut element = ReconstructorElement::default();
    let mut out: Vec<DeviceReport> = Vec::new();

    element.consume(DeviceReport::at(Sample::new(0.0, 0.0)), &mut out);
    element.set_property("Big Movement Cutoff", 5.0).unwrap();
    element.consume(DeviceReport::at(Sample::new(10.0, 0.0)), &mut out);
    element.set_property("EMA Weight", 1.0).unwrap();
    element.consume(DeviceReport::at(Sample::new(12.0, 0.0)), &mut out);

    assert_eq!(out[1].position(), Some(Sample::new(10.0, 0.0)));
    assert_eq!(out[2].position(), Some(Sample::new(12.0, 0.0)));
    assert_eq!(element.reconstructor().property("EMA Weight").unwrap(), 1.0);

    assert!(matches!(
        element.set_property("Weight", 0.5),
        Err(Error::UnknownProperty(_))
    ));
}

#[test]
fn test_runs_before_transforms() {
    assert_eq!(ReconstructorElement::default().position(), PipelinePosition::PreTransform);
}

#[test]
fn test_parsed_stream_round_trip() {
    let input = "# pen down\n0,0\n\n2,1,300\nexpress key 1\n4,2\n";
    let mut device = ExponentialSmoother::new(0.5);
    let mut element = ReconstructorElement::default();
    let mut positions = Vec::new();
    let mut raw_lines = 0;

    for (index, line) in input.lines().enumerate() {
        let Some(mut report) = parse_report_line(index + 1, line).unwrap() else {
            continue;
        };
        if let Some(position) = report.position_mut() {
            *position = device.apply(*position);
        }
        let mut sink = FnSink(|report: DeviceReport| match report.position() {
            Some(position) => positions.push(position),
            None => raw_lines += 1,
        });
        element.consume(report, &mut sink);
    }

    assert_eq!(raw_lines, 1);
    assert_eq!(
        positions,
        vec![Sample::new(0.0, 0.0), Sample::new(2.0, 1.0), Sample::new(4.0, 2.0)]
    );
}

#[test]
fn test_shared_across_threads_with_mutex() {
    let element = Arc::new(Mutex::new(ReconstructorElement::default()));
    let collected = Arc::new(Mutex::new(Vec::<DeviceReport>::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let element = Arc::clone(&element);
            let collected = Arc::clone(&collected);
            thread::spawn(move || {
                for j in 0..25 {
                    let report = DeviceReport::at(Sample::new(f64::from(i), f64::from(j)));
                    let mut out = collected.lock().unwrap();
                    element.lock().unwrap().consume(report, &mut *out);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(collected.lock().unwrap().len(), 100);
    assert!(element.lock().unwrap().reconstructor().last_smoothed().is_some());
}
