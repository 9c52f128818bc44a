//! Trace history and shared randomizer behaviour of the process-wide runtime.

mod common;

use axcl_stub::ffi::*;
use axcl_stub::randomizer::{create_int32_random_instance, initialize_random};
use axcl_stub::runtime;
use axcl_sys::axclrtDeviceList;
use common::*;
use serial_test::serial;
use std::thread;

#[test]
#[serial]
fn test_history_records_calls_in_order() {
    reset();
    axclrtSetDevice(1);
    axclFinalize();
    axclrtSetDevice(2);

    let history = runtime().serializer().history();
    let names: Vec<_> = history.iter().map(|r| r.function).collect();
    assert_eq!(names, ["axclrtSetDevice", "axclFinalize", "axclrtSetDevice"]);
    assert!(history.windows(2).all(|w| w[0].sequence < w[1].sequence));

    let set_device = runtime().serializer().calls_to("axclrtSetDevice");
    assert_eq!(set_device.len(), 2);
    assert_eq!(set_device[1].input.as_ref(), image(&2i32).as_slice());
}

#[test]
#[serial]
fn test_clear_trace() {
    reset();
    axclrtSynchronizeDevice();
    assert!(runtime().serializer().last_call().is_some());
    AXCL_STUB_ClearTrace();
    assert!(runtime().serializer().last_call().is_none());
    assert_eq!(check(&[], &[]), NO_CALL);
}

#[test]
#[serial]
fn test_concurrent_calls_keep_records_whole() {
    reset();
    let workers: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..8 {
                    let mut list = axclrtDeviceList::zeroed();
                    unsafe { axclrtGetDeviceList(&mut list) };
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let expected_len = 4 + std::mem::size_of::<axclrtDeviceList>();
    for record in runtime().serializer().calls_to("axclrtGetDeviceList") {
        assert!(record.input.is_empty());
        assert_eq!(record.output.len(), expected_len);
    }
}

#[test]
#[serial]
fn test_shared_randomizer_helpers() {
    AXCL_STUB_SetSeed(99);
    let a: u64 = initialize_random();
    let r = create_int32_random_instance(10, 20);

    AXCL_STUB_SetSeed(99);
    assert_eq!(initialize_random::<u64>(), a);
    assert_eq!(create_int32_random_instance(10, 20), r);
    assert!((10..20).contains(&r));
    assert_eq!(create_int32_random_instance(5, 5), 5);
}
