use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fst_activity::{
    ActivityConfig, ActivityOrigin, Decoder, DesignDb, HierEvent, PinId, PowerSink, Result,
    SdcClock, VarHandle, VarKind, annotate_activities,
};

const TOGGLE_COUNT: u64 = 4096;

/// Synthetic capture: `width` scalar wires toggling out of phase.
struct ToggleDecoder {
    width: u32,
    events: Vec<HierEvent>,
}

impl ToggleDecoder {
    fn new(width: u32) -> Self {
        let mut events = vec![HierEvent::ScopeBegin {
            kind: 0,
            name: "bench".into(),
            component: String::new(),
        }];
        for i in 0..width {
            events.push(HierEvent::VarDecl {
                kind: VarKind::Wire.into(),
                name: format!("sig_{i}"),
                length: 1,
                handle: VarHandle(i + 1),
                is_alias: false,
            });
        }
        events.push(HierEvent::ScopeEnd);
        Self { width, events }
    }
}

impl Decoder for ToggleDecoder {
    fn start_time(&self) -> u64 {
        0
    }

    fn end_time(&self) -> u64 {
        TOGGLE_COUNT * 2
    }

    fn timescale_magnitude(&self) -> i8 {
        -9
    }

    fn version(&self) -> &str {
        "bench"
    }

    fn date(&self) -> &str {
        ""
    }

    fn var_count(&self) -> u64 {
        u64::from(self.width)
    }

    fn for_each_hier_event(&mut self, visit: &mut dyn FnMut(HierEvent)) -> Result<()> {
        for event in &self.events {
            visit(event.clone());
        }
        Ok(())
    }

    fn for_each_value_change(
        &mut self,
        selection: &[VarHandle],
        visit: &mut dyn FnMut(u64, VarHandle, &[u8]),
    ) -> Result<()> {
        for step in 0..TOGGLE_COUNT {
            for &handle in selection {
                let phase = (step + u64::from(handle.0)) % 2;
                let raw = if phase == 0 { b"0" } else { b"1" };
                visit(step * 2, handle, raw);
            }
        }
        Ok(())
    }
}

struct EveryPinNetwork {
    clocks: Vec<SdcClock>,
}

impl DesignDb for EveryPinNetwork {
    fn clocks(&self) -> &[SdcClock] {
        &self.clocks
    }

    fn find_pin(&self, name: &str) -> Option<PinId> {
        let index: u64 = name.strip_prefix("sig_")?.parse().ok()?;
        Some(PinId(index))
    }

    fn is_leaf_pin_clock(&self, _pin: PinId) -> bool {
        false
    }

    fn leaf_pin_clocks(&self, _pin: PinId) -> Vec<&SdcClock> {
        Vec::new()
    }
}

struct NullSink {
    deposits: usize,
}

impl PowerSink for NullSink {
    fn set_user_activity(
        &mut self,
        _pin: PinId,
        _activity: f64,
        _duty: f64,
        _origin: ActivityOrigin,
    ) {
        self.deposits += 1;
    }
}

fn bench_annotate(c: &mut Criterion) {
    let network = EveryPinNetwork {
        clocks: vec![SdcClock {
            name: "clk".into(),
            period: 2e-9,
        }],
    };

    let mut group = c.benchmark_group("annotate");
    for width in [32u32, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let mut decoder = ToggleDecoder::new(width);
                let mut sink = NullSink { deposits: 0 };
                let report = annotate_activities(
                    &mut decoder,
                    &network,
                    &mut sink,
                    &ActivityConfig::default(),
                )
                .expect("annotate");
                assert_eq!(report.annotated_pins, width as usize);
                assert_eq!(sink.deposits, width as usize);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_annotate);
criterion_main!(benches);
