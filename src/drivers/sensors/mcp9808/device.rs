//! Instância de um sensor MCP9808 (um por endereço no barramento)

use super::config::REG_AMBIENT_TEMP;
use super::ioctl::{TempReading, IOCTL_MCP9808_READ_TEMP};
use crate::drivers::base::DriverError;
use crate::drivers::i2c::I2cClient;
use crate::fs::devfs::{Device, DeviceNumber, DeviceType, OpenFlags, UserBuffer};
use crate::sys::error::Errno;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use spin::Mutex;

pub struct Mcp9808Device {
    client: Arc<I2cClient>,
    devt: DeviceNumber,
    /// `<nome><addr em hex>`, ex: `mcp9808mz18`
    node: String,
    /// Última leitura entregue. O lock cobre ler → guardar → copiar.
    reading: Mutex<TempReading>,
    open_handles: AtomicUsize,
    /// Desligado na remoção; escrito só com `reading` travado
    registered: AtomicBool,
}

impl Mcp9808Device {
    pub fn new(client: Arc<I2cClient>, devt: DeviceNumber) -> Self {
        let node = format!("{}{:x}", client.name(), client.addr());
        Self {
            client,
            devt,
            node,
            reading: Mutex::new(TempReading::default()),
            open_handles: AtomicUsize::new(0),
            registered: AtomicBool::new(true),
        }
    }

    pub fn client(&self) -> &I2cClient {
        &self.client
    }

    pub fn addr(&self) -> u16 {
        self.client.addr()
    }

    pub fn node_name(&self) -> &str {
        &self.node
    }

    pub fn devt(&self) -> DeviceNumber {
        self.devt
    }

    /// Valor guardado pelo último READ_TEMP bem-sucedido
    pub fn last_reading(&self) -> TempReading {
        *self.reading.lock()
    }

    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    /// Ainda pertence ao registro?
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// Desliga a instância. Espera um READ_TEMP em andamento terminar;
    /// depois disso nenhuma transação nova sai por ela.
    pub(super) fn retire(&self) {
        let _reading = self.reading.lock();
        self.registered.store(false, Ordering::SeqCst);
    }

    /// Despacha um comando de controle
    pub fn control(
        &self,
        cmd: u32,
        arg: Option<&mut dyn UserBuffer>,
    ) -> Result<usize, DriverError> {
        crate::ktrace!("(MCP9808) ioctl ", self.node, " addr=", self.addr(), " cmd=", cmd);

        if !self.is_registered() {
            crate::kbug!("(MCP9808)", self.node, " removido");
            return Err(DriverError::Removed);
        }

        match cmd {
            IOCTL_MCP9808_READ_TEMP => self.read_temp(arg),
            _ => {
                crate::kbug!("(MCP9808)", "cmd=", cmd);
                Err(DriverError::InvalidRequest)
            }
        }
    }

    fn read_temp(&self, arg: Option<&mut dyn UserBuffer>) -> Result<usize, DriverError> {
        // Sem destino não há como devolver a leitura: nem toca o barramento
        let Some(out) = arg else {
            crate::kbug!("(MCP9808)", self.node, " buffer nulo");
            return Err(DriverError::InvalidArgument);
        };

        let mut reading = self.reading.lock();
        // Remoção pode ter vencido a corrida desde a checagem em `control`
        if !self.is_registered() {
            crate::kbug!("(MCP9808)", self.node, " removido");
            return Err(DriverError::Removed);
        }

        let raw = self.client.read_word_swapped(REG_AMBIENT_TEMP).map_err(|e| {
            crate::kbug!("(MCP9808)", self.node, " leitura: ", e);
            DriverError::Io(e)
        })?;
        crate::ktrace!("(MCP9808) Leitura: ", raw);

        *reading = TempReading::from_raw(raw);

        out.copy_to_user(&reading.to_bytes()).map_err(|e| {
            crate::kbug!("(MCP9808)", self.node, " cópia: ", e);
            DriverError::CopyFailed
        })?;
        Ok(0)
    }
}

impl Device for Mcp9808Device {
    fn name(&self) -> &str {
        &self.node
    }

    fn device_type(&self) -> DeviceType {
        DeviceType::Character
    }

    fn device_number(&self) -> DeviceNumber {
        self.devt
    }

    fn open(&self, _flags: OpenFlags) -> Result<(), Errno> {
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        crate::ktrace!("(MCP9808) Dispositivo ", self.node, " aberto, addr=", self.addr());
        Ok(())
    }

    fn close(&self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
        crate::ktrace!("(MCP9808) Dispositivo ", self.node, " fechado, addr=", self.addr());
    }

    fn ioctl(&self, cmd: u32, arg: Option<&mut dyn UserBuffer>) -> Result<usize, Errno> {
        self.control(cmd, arg).map_err(Errno::from)
    }
}
