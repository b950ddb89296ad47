//! Decoder behaviour against a small synthetic panel family.
//!
//! The family has three mapped controls, one control with no location, a pair
//! of light sensors at offsets 5 and 7, and a 9-byte minimum report.

use panel_engine::{
    AmbientLightSensors, BacklightChannel, BacklightSource, BitLocation, ControlMap,
    EngineConfig, InitialReportPolicy, OutputReport, PanelControl, PanelEvent, PanelFamily,
    ProcessingOrder, ReportDecoder, SensorReading,
};
use panel_hid_common::hid_traits::mock::MockHidDevice;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Pad {
    Alpha,
    Bravo,
    Charlie,
    Unwired,
}

impl PanelControl for Pad {
    const ALL: &'static [Self] = &[Self::Alpha, Self::Bravo, Self::Charlie, Self::Unwired];

    fn name(self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Bravo => "BRAVO",
            Self::Charlie => "CHARLIE",
            Self::Unwired => "UNWIRED",
        }
    }
}

struct PadMap;

impl ControlMap for PadMap {
    type Control = Pad;

    fn locate(control: Pad) -> BitLocation {
        match control {
            Pad::Alpha => BitLocation::new(0x01, 1),
            Pad::Bravo => BitLocation::new(0x02, 1),
            Pad::Charlie => BitLocation::new(0x80, 2),
            Pad::Unwired => BitLocation::UNMAPPED,
        }
    }
}

struct TestPad;

impl PanelFamily for TestPad {
    const NAME: &'static str = "test-pad";
    const MIN_REPORT_LEN: usize = 9;
    const REPORT_LEN: usize = 9;
    const COMMAND_PREFIX: u16 = 0x1234;
    const BACKLIGHT_CHANNELS: &'static [BacklightChannel] = &[];

    type Control = Pad;
    type Map = PadMap;
    type Sensors = AmbientLightSensors<5, 7>;
    type Leds = ();
    type Display = ();

    fn init_packet(_report: &mut OutputReport) -> bool {
        false
    }
}

struct SensorsFirstPad;

impl PanelFamily for SensorsFirstPad {
    const NAME: &'static str = "sensors-first-pad";
    const MIN_REPORT_LEN: usize = 9;
    const REPORT_LEN: usize = 9;
    const COMMAND_PREFIX: u16 = 0x1234;
    const BACKLIGHT_CHANNELS: &'static [BacklightChannel] =
        &[BacklightChannel::new(0x00, BacklightSource::Panel)];
    const PROCESSING_ORDER: ProcessingOrder = ProcessingOrder::SensorsFirst;

    type Control = Pad;
    type Map = PadMap;
    type Sensors = AmbientLightSensors<5, 7>;
    type Leds = ();
    type Display = ();

    fn init_packet(_report: &mut OutputReport) -> bool {
        false
    }
}

fn report(bytes: &[(usize, u8)]) -> [u8; 9] {
    let mut data = [0u8; 9];
    for (offset, value) in bytes {
        data[*offset] = *value;
    }
    data
}

fn with_light(mut data: [u8; 9], left: u16, right: u16) -> [u8; 9] {
    data[5..7].copy_from_slice(&left.to_le_bytes());
    data[7..9].copy_from_slice(&right.to_le_bytes());
    data
}

fn controls(events: &[PanelEvent<Pad>]) -> Vec<(Pad, bool)> {
    events.iter().filter_map(PanelEvent::control).collect()
}

// ---------------------------------------------------------------------------
// Edge detection
// ---------------------------------------------------------------------------

#[test]
fn press_then_identical_report_is_idempotent() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    assert_eq!(decoder.on_report(&report(&[]), &mut events), 0);
    assert_eq!(decoder.on_report(&report(&[(1, 0x01)]), &mut events), 1);
    assert_eq!(controls(&events), vec![(Pad::Alpha, true)]);

    events.clear();
    assert_eq!(decoder.on_report(&report(&[(1, 0x01)]), &mut events), 0);
    assert!(events.is_empty());
}

#[test]
fn release_reports_inactive() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&report(&[(1, 0x03)]), &mut events);
    decoder.on_report(&report(&[(1, 0x02)]), &mut events);

    assert_eq!(
        controls(&events),
        vec![(Pad::Alpha, true), (Pad::Bravo, true), (Pad::Alpha, false)]
    );
    assert!(!decoder.is_active(Pad::Alpha));
    assert!(decoder.is_active(Pad::Bravo));
}

#[test]
fn events_follow_offset_then_bit_order() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&report(&[(1, 0x03), (2, 0x80)]), &mut events);

    assert_eq!(
        controls(&events),
        vec![(Pad::Alpha, true), (Pad::Bravo, true), (Pad::Charlie, true)]
    );
    let seqs: Vec<u64> = events.iter().map(PanelEvent::seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    let at = events.first().map(PanelEvent::at);
    assert!(events.iter().all(|e| Some(e.at()) == at), "one report, one timestamp");
}

#[test]
fn reserved_bits_are_ignored() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    // byte 0 carries no controls; 0x04 at offset 1 and 0x7F at offset 2 are reserved
    decoder.on_report(&report(&[(0, 0xFF), (1, 0x04), (2, 0x7F), (3, 0xAA)]), &mut events);
    decoder.on_report(&report(&[(3, 0x55)]), &mut events);

    assert!(events.is_empty());
    assert_eq!(decoder.reports_processed(), 2);
}

#[test]
fn engaged_controls_follow_latest_report() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();
    assert_eq!(decoder.engaged_controls().count(), 0);

    decoder.on_report(&report(&[(1, 0x02), (2, 0x80)]), &mut events);
    let engaged: Vec<_> = decoder.engaged_controls().collect();
    assert_eq!(engaged, vec![Pad::Bravo, Pad::Charlie]);
    assert!(!decoder.is_active(Pad::Unwired));
}

#[test]
fn longer_report_tail_is_diffed_against_zero() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&report(&[]), &mut events);
    let mut long = report(&[(2, 0x80)]).to_vec();
    long.extend_from_slice(&[0xFF; 7]);
    decoder.on_report(&long, &mut events);

    assert_eq!(controls(&events), vec![(Pad::Charlie, true)]);
    assert_eq!(decoder.last_report().map(<[u8]>::len), Some(16));
}

// ---------------------------------------------------------------------------
// Initial report policy
// ---------------------------------------------------------------------------

#[test]
fn seed_zero_surfaces_controls_held_at_connect() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&report(&[(1, 0x02)]), &mut events);
    assert_eq!(controls(&events), vec![(Pad::Bravo, true)]);
}

#[test]
fn seed_current_takes_first_report_as_baseline() {
    let config = EngineConfig {
        initial_report: InitialReportPolicy::SeedCurrent,
        ..EngineConfig::default()
    };
    let mut decoder = ReportDecoder::<TestPad>::new(config);
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    let first = with_light(report(&[(1, 0x02)]), 0x0FFF, 0x0FFF);
    assert_eq!(decoder.on_report(&first, &mut events), 0);
    assert!(decoder.is_active(Pad::Bravo), "held control is still queryable");
    assert_eq!(decoder.sensors().percent(), 100);

    let second = with_light(report(&[]), 0x0FFF, 0x0FFF);
    decoder.on_report(&second, &mut events);
    assert_eq!(controls(&events), vec![(Pad::Bravo, false)]);
}

#[test]
fn reset_rearms_initial_policy_but_keeps_sequence() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&report(&[(1, 0x01)]), &mut events);
    decoder.reset();
    assert_eq!(decoder.last_report(), None);
    decoder.on_report(&report(&[(1, 0x01)]), &mut events);

    assert_eq!(controls(&events), vec![(Pad::Alpha, true), (Pad::Alpha, true)]);
    assert_eq!(events.last().map(PanelEvent::seq), Some(2));
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[test]
fn short_report_changes_nothing() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();
    let baseline = with_light(report(&[(1, 0x01)]), 0x0800, 0x0800);
    decoder.on_report(&baseline, &mut events);
    events.clear();

    let emitted = decoder.on_report(&[0xFF; 8], &mut events);

    assert_eq!(emitted, 0);
    assert!(events.is_empty());
    assert_eq!(decoder.last_report(), Some(&baseline[..]));
    assert_eq!(decoder.sensors().left(), 0x0800);
    assert_eq!(decoder.last_seq(), 2);
    assert_eq!(decoder.reports_dropped(), 1);
    assert_eq!(decoder.reports_processed(), 1);
}

#[test]
fn min_len_override_only_raises() {
    let raised = EngineConfig {
        min_report_len_override: Some(12),
        ..EngineConfig::default()
    };
    let lowered = EngineConfig {
        min_report_len_override: Some(2),
        ..EngineConfig::default()
    };
    assert_eq!(ReportDecoder::<TestPad>::new(raised).min_report_len(), 12);
    assert_eq!(ReportDecoder::<TestPad>::new(lowered).min_report_len(), 9);
}

// ---------------------------------------------------------------------------
// Sensors and processing order
// ---------------------------------------------------------------------------

#[test]
fn sensor_change_follows_control_changes() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&with_light(report(&[(1, 0x01)]), 0, 0x0FFF), &mut events);

    assert_eq!(events.len(), 2);
    assert_eq!(events.first().and_then(PanelEvent::control), Some((Pad::Alpha, true)));
    assert_eq!(
        events.get(1).and_then(PanelEvent::sensor),
        Some(SensorReading::AmbientLight { percent: 50 })
    );
}

#[test]
fn sensors_first_family_reverses_order() {
    let mut decoder = ReportDecoder::<SensorsFirstPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    decoder.on_report(&with_light(report(&[(1, 0x01)]), 0x0FFF, 0x0FFF), &mut events);

    assert_eq!(
        events.first().and_then(PanelEvent::sensor),
        Some(SensorReading::AmbientLight { percent: 100 })
    );
    assert_eq!(events.get(1).and_then(PanelEvent::control), Some((Pad::Alpha, true)));
}

#[test]
fn sensor_jitter_does_not_spam() {
    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();

    for raw in [0x0800u16, 0x0801, 0x0802, 0x07FF] {
        decoder.on_report(&with_light(report(&[]), raw, raw), &mut events);
    }

    let readings: Vec<_> = events.iter().filter_map(PanelEvent::sensor).collect();
    assert_eq!(readings, vec![SensorReading::AmbientLight { percent: 50 }]);
}

// ---------------------------------------------------------------------------
// Transport pump
// ---------------------------------------------------------------------------

#[test]
fn pump_reads_from_transport() -> Result<(), Box<dyn std::error::Error>> {
    let mut device = MockHidDevice::new(0x4098, 0xFFFF, "/dev/hidraw7");
    device.queue_read(report(&[(2, 0x80)]).to_vec());
    device.queue_read(vec![0x01, 0x02]);

    let mut decoder = ReportDecoder::<TestPad>::default();
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();
    let mut buf = [0u8; 64];

    assert_eq!(decoder.pump(&mut device, &mut buf, 5, &mut events)?, 1);
    assert_eq!(decoder.pump(&mut device, &mut buf, 5, &mut events)?, 0, "short read");
    assert_eq!(decoder.pump(&mut device, &mut buf, 5, &mut events)?, 0, "timeout");
    assert_eq!(decoder.reports_dropped(), 1);

    device.disconnect();
    assert!(decoder.pump(&mut device, &mut buf, 5, &mut events).is_err());
    Ok(())
}

#[test]
fn events_cross_threads_through_channel() {
    let config = EngineConfig::default();
    let (mut tx, rx) = config.event_channel::<Pad>();

    let reader = std::thread::spawn(move || {
        let mut decoder = ReportDecoder::<TestPad>::new(EngineConfig::default());
        decoder.on_report(&report(&[(1, 0x01)]), &mut tx);
        decoder.on_report(&report(&[]), &mut tx);
    });
    let joined = reader.join();
    assert!(joined.is_ok());

    let got: Vec<_> = rx.try_iter().filter_map(|e| e.control()).collect();
    assert_eq!(got, vec![(Pad::Alpha, true), (Pad::Alpha, false)]);
}

#[test]
fn unmapped_bit_tracing_is_opt_in() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init()
        .unwrap_or_default();

    let config = EngineConfig {
        log_unmapped_bits: true,
        ..EngineConfig::default()
    };
    let mut decoder = ReportDecoder::<TestPad>::new(config);
    let mut events: Vec<PanelEvent<Pad>> = Vec::new();
    decoder.on_report(&report(&[(3, 0x10)]), &mut events);
    assert!(events.is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn mapped_changes(old: &[u8], new: &[u8]) -> usize {
    Pad::ALL
        .iter()
        .map(|c| PadMap::locate(*c))
        .filter(|loc| loc.is_mapped() && loc.is_set(old) != loc.is_set(new))
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Feeding the same report twice never emits on the second pass.
    #[test]
    fn prop_repeat_report_is_silent(data in proptest::collection::vec(any::<u8>(), 9..32)) {
        let mut decoder = ReportDecoder::<TestPad>::default();
        let mut events: Vec<PanelEvent<Pad>> = Vec::new();
        decoder.on_report(&data, &mut events);
        events.clear();
        prop_assert_eq!(decoder.on_report(&data, &mut events), 0);
    }

    /// Control events equal the number of mapped bits that flipped.
    #[test]
    fn prop_one_event_per_flipped_control(
        a in proptest::collection::vec(any::<u8>(), 9..=9),
        b in proptest::collection::vec(any::<u8>(), 9..=9),
    ) {
        let mut decoder = ReportDecoder::<TestPad>::default();
        let mut events: Vec<PanelEvent<Pad>> = Vec::new();
        decoder.on_report(&a, &mut events);
        events.clear();
        decoder.on_report(&b, &mut events);
        prop_assert_eq!(controls(&events).len(), mapped_changes(&a, &b));
        for (control, active) in controls(&events) {
            prop_assert_eq!(active, PadMap::locate(control).is_set(&b));
        }
    }

    /// Reports below the minimum are always rejected without events.
    #[test]
    fn prop_short_reports_rejected(data in proptest::collection::vec(any::<u8>(), 0..9)) {
        let mut decoder = ReportDecoder::<TestPad>::default();
        let mut events: Vec<PanelEvent<Pad>> = Vec::new();
        prop_assert_eq!(decoder.on_report(&data, &mut events), 0);
        prop_assert_eq!(decoder.last_report(), None);
        prop_assert_eq!(decoder.last_seq(), 0);
    }
}
