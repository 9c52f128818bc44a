//! `axcl_rt_device.h`: device enumeration, selection and properties.

use super::{reject_null_output, status_only, FULL_VERSION};
use crate::randomizer::{create_int32_random_instance, initialize_random};
use crate::runtime::runtime;
use axcl_sys::{
    axclError, axclrtDeviceList, axclrtDeviceProperties, AXCL_MAX_DEVICE_COUNT, AXCL_SUCC,
};

/// `axclError axclrtSetDevice(int32_t deviceId);`
#[no_mangle]
pub extern "C" fn axclrtSetDevice(deviceId: i32) -> axclError {
    status_only("axclrtSetDevice", &[&deviceId])
}

/// `axclError axclrtResetDevice(int32_t deviceId);`
#[no_mangle]
pub extern "C" fn axclrtResetDevice(deviceId: i32) -> axclError {
    status_only("axclrtResetDevice", &[&deviceId])
}

/// `axclError axclrtGetDevice(int32_t *deviceId);`
#[no_mangle]
pub unsafe extern "C" fn axclrtGetDevice(deviceId: *mut i32) -> axclError {
    const FUNCTION: &str = "axclrtGetDevice";

    let rt = runtime();
    let mut call = rt.serializer().begin(FUNCTION);
    if deviceId.is_null() {
        return reject_null_output(call, FUNCTION);
    }

    let id: i32 = initialize_random();
    deviceId.write(id);
    let ret = rt.fabricate_status();
    call.output(&[&ret, &id]);
    call.commit();
    ret
}

/// `axclError axclrtGetDeviceCount(uint32_t *count);`
#[no_mangle]
pub unsafe extern "C" fn axclrtGetDeviceCount(count: *mut u32) -> axclError {
    const FUNCTION: &str = "axclrtGetDeviceCount";

    let rt = runtime();
    let mut call = rt.serializer().begin(FUNCTION);
    if count.is_null() {
        return reject_null_output(call, FUNCTION);
    }

    let value: u32 = initialize_random();
    count.write(value);
    let ret = rt.fabricate_status();
    call.output(&[&ret, &value]);
    call.commit();
    ret
}

/// `axclError axclrtGetDeviceList(axclrtDeviceList *deviceList);`
///
/// Reports `num` in `[0, AXCL_MAX_DEVICE_COUNT)` random ids; every slot past
/// `num` stays zero. Always succeeds.
#[no_mangle]
pub unsafe extern "C" fn axclrtGetDeviceList(deviceList: *mut axclrtDeviceList) -> axclError {
    const FUNCTION: &str = "axclrtGetDeviceList";

    let rt = runtime();
    let mut call = rt.serializer().begin(FUNCTION);
    if deviceList.is_null() {
        return reject_null_output(call, FUNCTION);
    }

    deviceList.write(axclrtDeviceList::zeroed());
    let list = &mut *deviceList;

    list.num = create_int32_random_instance(0, AXCL_MAX_DEVICE_COUNT as i32) as u32;
    for id in &mut list.devices[..list.num as usize] {
        *id = initialize_random();
    }

    let ret = AXCL_SUCC;
    call.output(&[&ret, &*list]);
    call.commit();
    ret
}

/// `axclError axclrtSynchronizeDevice();`
#[no_mangle]
pub extern "C" fn axclrtSynchronizeDevice() -> axclError {
    status_only("axclrtSynchronizeDevice", &[])
}

/// `axclError axclrtGetDeviceProperties(int32_t deviceId, axclrtDeviceProperties *properties);`
///
/// `swVersion` is always `"1.0.0"`; every other field, reserved words
/// included, is random.
#[no_mangle]
pub unsafe extern "C" fn axclrtGetDeviceProperties(
    deviceId: i32,
    properties: *mut axclrtDeviceProperties,
) -> axclError {
    const FUNCTION: &str = "axclrtGetDeviceProperties";

    let rt = runtime();
    let mut call = rt.serializer().begin(FUNCTION);
    call.input(&[&deviceId]);
    if properties.is_null() {
        return reject_null_output(call, FUNCTION);
    }

    properties.write(axclrtDeviceProperties::zeroed());
    let props = &mut *properties;
    props.set_sw_version(FULL_VERSION.to_bytes());

    let randomizer = rt.randomizer();
    props.uid = randomizer.random();
    props.pciDomain = randomizer.random();
    props.pciBusID = randomizer.random();
    props.pciDeviceID = randomizer.random();
    props.temperature = randomizer.random();
    props.totalMemSize = randomizer.random();
    props.freeMemSize = randomizer.random();
    props.totalCmmSize = randomizer.random();
    props.freeCmmSize = randomizer.random();
    props.cpuLoading = randomizer.random();
    props.npuLoading = randomizer.random();
    randomizer.fill(&mut props.reserved);

    let ret = rt.fabricate_status();
    call.output(&[&ret, &*props]);
    call.commit();
    ret
}
