use std::sync::{Arc, Mutex};

use mockall::mock;
use pipesim_core::soc::Device;

mock! {
    pub Peripheral {
        pub fn read_u8(&mut self, offset: u32) -> u8;
        pub fn write_u8(&mut self, offset: u32, val: u8);
        pub fn tick(&mut self);
        pub fn flush(&mut self);
    }
}

/// A bus device forwarding byte accesses and clock events to a [`MockPeripheral`].
///
/// The mock is shared so expectations can be checked after the device moved onto the bus.
#[derive(Clone)]
pub struct SharedPeripheral {
    pub mock: Arc<Mutex<MockPeripheral>>,
    base: u32,
    size: u32,
}

impl SharedPeripheral {
    pub fn new(mock: MockPeripheral, base: u32, size: u32) -> Self {
        Self {
            mock: Arc::new(Mutex::new(mock)),
            base,
            size,
        }
    }
}

impl std::fmt::Debug for SharedPeripheral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPeripheral")
            .field("base", &self.base)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Device for SharedPeripheral {
    fn name(&self) -> &str {
        "mock"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, self.size)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.mock.lock().unwrap().read_u8(offset)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.mock.lock().unwrap().write_u8(offset, val);
    }

    fn tick(&mut self) {
        self.mock.lock().unwrap().tick();
    }

    fn flush(&mut self) {
        self.mock.lock().unwrap().flush();
    }
}

/// A plain device covering `size` bytes at `base` with no expectations beyond clock events.
pub fn quiet_device(base: u32, size: u32) -> SharedPeripheral {
    let mut mock = MockPeripheral::new();
    let _ = mock.expect_tick().return_const(());
    let _ = mock.expect_flush().return_const(());
    SharedPeripheral::new(mock, base, size)
}
