#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use modalbox_core::GestureTracker;
use web_time::Instant;

fuzz_target!(|data: &[u8]| {
    // Each 3-byte chunk: opcode, signed position, time step.
    let base = Instant::now() + Duration::from_secs(60);
    let mut tracker = GestureTracker::new();
    let mut offset_ms: i64 = 0;

    for chunk in data.chunks_exact(3) {
        let y = f64::from(chunk[1] as i8) * 4.0;
        // Allow time to move backwards occasionally.
        offset_ms += i64::from(chunk[2] as i8);
        let now = if offset_ms >= 0 {
            base + Duration::from_millis(offset_ms.unsigned_abs())
        } else {
            base - Duration::from_millis(offset_ms.unsigned_abs().min(59_000))
        };

        let sample = match chunk[0] % 4 {
            0 => {
                tracker.begin(y, f64::from(chunk[2]), 128.0, now);
                tracker.last_sample()
            }
            1 => tracker.update(y, now),
            2 => {
                let sample = tracker.end(y, now);
                assert!(!tracker.is_active());
                sample
            }
            _ => {
                tracker.cancel();
                assert!(tracker.last_sample().is_none());
                None
            }
        };

        if let Some(sample) = sample {
            assert!(sample.displacement_px.is_finite());
            assert!(sample.velocity_px_per_ms.is_finite());
        }
    }
});
