use crate::error::TracerError;
use log::info;
use wgpu::{Adapter, DownlevelFlags};

/// The accumulation happens in the fragment stage, which therefore writes storage buffers.
const REQUIRED_DOWNLEVEL_FLAGS: DownlevelFlags = DownlevelFlags::FRAGMENT_WRITABLE_STORAGE;

pub(crate) fn check_adapter_capabilities(adapter: &Adapter) -> Result<(), TracerError> {
    check_downlevel_flags(adapter.get_downlevel_capabilities().flags)
}

fn check_downlevel_flags(flags: DownlevelFlags) -> Result<(), TracerError> {
    if flags.contains(REQUIRED_DOWNLEVEL_FLAGS) {
        Ok(())
    } else {
        Err(TracerError::allocation_failure(format!("adapter lacks {:?}", REQUIRED_DOWNLEVEL_FLAGS - flags)))
    }
}

pub(crate) fn log_adapter_info(adapter: &Adapter) {
    let adapter_info = adapter.get_info();
    info!(
        "Adapter Info:\n\
         Name: {}\n\
         Backend: {:?}\n\
         Vendor: {:#x}\n\
         Device: {:#x}\n\
         Device Type: {:?}\n\
         Driver: {:?}\n\
         Driver Info: {:?}",
        adapter_info.name,
        adapter_info.backend,
        adapter_info.vendor,
        adapter_info.device,
        adapter_info.device_type,
        adapter_info.driver,
        adapter_info.driver_info,
    );
}
