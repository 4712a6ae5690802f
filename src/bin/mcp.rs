//! mcp: cliente de demonstração.
//!
//! Monta DevFS + barramento com um sensor simulado em 0x18, carrega o
//! driver, abre `/dev/mcp9808mz18`, faz um READ_TEMP e imprime a
//! temperatura.

use mcp9808::core::logging::{self, LogSink};
use mcp9808::drivers::i2c::{I2cBoardInfo, I2cBus, StubAdapter};
use mcp9808::drivers::sensors::mcp9808::codec::{self, Celsius};
use mcp9808::drivers::sensors::mcp9808::config::{COMPATIBLE, REG_AMBIENT_TEMP};
use mcp9808::fs::devfs::OpenFlags;
use mcp9808::{DevFS, Mcp9808Module, TempReading, IOCTL_MCP9808_READ_TEMP};
use std::process::ExitCode;
use std::sync::Arc;

const NODE: &str = "/dev/mcp9808mz18";
const SENSOR_ADDR: u16 = 0x18;
/// Temperatura do sensor simulado: 23.5 °C
const SIMULATED: Celsius = Celsius::from_sixteenths(23 * 16 + 8);

/// Logs do driver vão para stderr
struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&self, line: &str) {
        eprintln!("{}", line);
    }
}

static SINK: StderrSink = StderrSink;

fn main() -> ExitCode {
    if std::env::args().len() != 1 {
        println!("Use 'mcp' command only");
        return ExitCode::SUCCESS;
    }

    logging::set_sink(&SINK);

    let stub = Arc::new(StubAdapter::new());
    stub.set_register(SENSOR_ADDR, REG_AMBIENT_TEMP, codec::encode(SIMULATED).unwrap_or(0));

    let devfs = Arc::new(DevFS::new());
    let bus = Arc::new(I2cBus::new(stub));

    let module = match Mcp9808Module::load(devfs.clone(), bus.clone()) {
        Ok(module) => module,
        Err(e) => {
            println!("Can't load driver: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = match bus.add_device(I2cBoardInfo::new(COMPATIBLE, SENSOR_ADDR)) {
        Ok(_) => read_once(&devfs),
        Err(e) => {
            println!("Can't add device: {}", e);
            ExitCode::FAILURE
        }
    };

    module.unload();
    status
}

fn read_once(devfs: &DevFS) -> ExitCode {
    let mut handle = match devfs.open(NODE, OpenFlags::RDWR) {
        Ok(handle) => handle,
        Err(e) => {
            println!("Can't open fd = {}", e.as_isize());
            return ExitCode::FAILURE;
        }
    };

    let mut out = [0u8; 4];
    if let Err(e) = handle.ioctl(IOCTL_MCP9808_READ_TEMP, Some(&mut out)) {
        println!("Can't ioctl, ret = {}", e.as_isize());
        let _ = handle.close();
        return ExitCode::FAILURE;
    }

    if let Err(e) = handle.close() {
        println!("Can't close, ret = {}", e.as_isize());
    }

    let reading = TempReading::from_bytes(out);
    println!("Temp: {:.2}'C", reading.celsius());
    ExitCode::SUCCESS
}
