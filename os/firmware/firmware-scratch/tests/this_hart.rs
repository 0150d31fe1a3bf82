use firmware_platform::{
    BootKind, HartContext, HartId, PlatformDescriptor, PlatformOps, PlatformResult,
};
use firmware_scratch::{HartIdSource, HartScratch, NextMode, ScratchTable, ThisHart};
use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

thread_local! {
    static CURRENT: Cell<u32> = const { Cell::new(0) };
}

/// Each test thread plays one hart.
struct ThreadHart;

impl HartIdSource for ThreadHart {
    fn hart_id(&self) -> HartId {
        HartId::new(CURRENT.with(Cell::get))
    }
}

struct CountingBoard {
    inits: AtomicU32,
}

impl PlatformOps for CountingBoard {
    fn timer_init(&self, _hart: HartId, _boot: BootKind) -> PlatformResult {
        self.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

static BOARD_A: CountingBoard = CountingBoard {
    inits: AtomicU32::new(0),
};
static BOARD_B: CountingBoard = CountingBoard {
    inits: AtomicU32::new(0),
};

static DESC_A: PlatformDescriptor<'static> =
    PlatformDescriptor::new("board-a", &BOARD_A).with_harts(4, 4096);
static DESC_B: PlatformDescriptor<'static> =
    PlatformDescriptor::new("board-b", &BOARD_B).with_harts(4, 4096);

static TABLE: ScratchTable<'static, 4> = ScratchTable::new();

#[test]
fn every_hart_resolves_its_own_descriptor() {
    // even harts on A, odd harts on B
    for id in 0..4 {
        let desc = if id % 2 == 0 { &DESC_A } else { &DESC_B };
        TABLE
            .install(
                HartScratch::new(HartId::new(id))
                    .with_platform(Some(desc))
                    .with_next_mode(NextMode::Supervisor)
                    .with_warmboot_addr(0x8000_0000),
            )
            .unwrap();
    }

    let start = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4u32)
        .map(|id| {
            let start = Arc::clone(&start);
            thread::spawn(move || {
                CURRENT.with(|c| c.set(id));
                let ctx = ThisHart::new(&TABLE, ThreadHart);
                start.wait();

                assert_eq!(ctx.current_hart(), HartId::new(id));
                let p = ctx.dispatch();
                p.timer_init(ctx.current_hart(), BootKind::Cold).unwrap();
                p.name().map(str::to_owned)
            })
        })
        .collect();

    let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        names,
        ["board-a", "board-b", "board-a", "board-b"].map(|s| Some(s.to_owned()))
    );
    assert_eq!(BOARD_A.inits.load(Ordering::SeqCst), 2);
    assert_eq!(BOARD_B.inits.load(Ordering::SeqCst), 2);

    let s = TABLE.get(HartId::new(1)).unwrap();
    assert_eq!(s.warmboot_addr(), 0x8000_0000);
    assert_eq!(s.next_mode(), NextMode::Supervisor);
}
