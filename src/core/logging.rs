// =============================================================================
// DRIVER LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do driver com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - cada valor sabe se escrever num Record de pilha
// - SEM alocação - o Record é um buffer fixo, truncado se necessário
// - Cada registro é entregue inteiro ao LogSink (sem intercalar linhas)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Falhas de operação (sempre com arquivo:linha via kbug!)
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal (probe, remove, init, exit)
// - DEBUG: Informações de debugging
// - TRACE: Cada open/close/ioctl
//
// COMO USAR:
//   kinfo!("(MCP9808) Inicializando...");            // Apenas string
//   kinfo!("(MCP9808) Addr=", 0x18u16);              // String + hex
//   kinfo!("(MCP9808) ", name, " minor=", Dec(3));   // Múltiplos valores
//   kbug!("(MCP9808)");                              // ERRO com arquivo:linha
//
// =============================================================================

use spin::RwLock;

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[OK]\x1b[0m ";
pub const P_FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m ";

/// Capacidade de um registro (bytes). Excedente é descartado.
pub const RECORD_CAPACITY: usize = 192;

// =============================================================================
// SINK
// =============================================================================

/// Destino final dos registros de log (serial, console, stderr...)
pub trait LogSink: Sync {
    /// Recebe uma linha completa, sem o `\n` final
    fn write_line(&self, line: &str);
}

static SINK: RwLock<Option<&'static dyn LogSink>> = RwLock::new(None);

/// Instala o destino dos logs. Sem sink, registros são descartados.
pub fn set_sink(sink: &'static dyn LogSink) {
    *SINK.write() = Some(sink);
}

/// Remove o sink atual.
pub fn clear_sink() {
    *SINK.write() = None;
}

// =============================================================================
// RECORD
// =============================================================================

/// Linha de log montada na pilha.
pub struct Record {
    buf: [u8; RECORD_CAPACITY],
    len: usize,
}

impl Record {
    pub fn new(prefix: &str) -> Self {
        let mut rec = Self {
            buf: [0; RECORD_CAPACITY],
            len: 0,
        };
        rec.push_str(prefix);
        rec
    }

    /// Anexa texto, cortando numa fronteira de caractere se não couber
    pub fn push_str(&mut self, s: &str) {
        let room = RECORD_CAPACITY - self.len;
        let mut n = s.len().min(room);
        while !s.is_char_boundary(n) {
            n -= 1;
        }
        self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
    }

    /// Anexa `0x` + dígitos hexadecimais (sem zeros à esquerda)
    pub fn push_hex(&mut self, value: u64) {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut tmp = [0u8; 16];
        let mut i = tmp.len();
        let mut v = value;
        loop {
            i -= 1;
            tmp[i] = DIGITS[(v & 0xF) as usize];
            v >>= 4;
            if v == 0 {
                break;
            }
        }
        self.push_str("0x");
        self.push_ascii(&tmp[i..]);
    }

    /// Anexa um inteiro sem sinal em decimal
    pub fn push_dec(&mut self, value: u64) {
        let mut tmp = [0u8; 20];
        let mut i = tmp.len();
        let mut v = value;
        loop {
            i -= 1;
            tmp[i] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        self.push_ascii(&tmp[i..]);
    }

    /// Anexa um inteiro com sinal em decimal
    pub fn push_signed(&mut self, value: i64) {
        if value < 0 {
            self.push_str("-");
        }
        self.push_dec(value.unsigned_abs());
    }

    fn push_ascii(&mut self, bytes: &[u8]) {
        let n = bytes.len().min(RECORD_CAPACITY - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
    }

    /// Conteúdo atual do registro
    pub fn as_str(&self) -> &str {
        match core::str::from_utf8(&self.buf[..self.len]) {
            Ok(s) => s,
            Err(e) => match core::str::from_utf8(&self.buf[..e.valid_up_to()]) {
                Ok(s) => s,
                Err(_) => "",
            },
        }
    }

    /// Entrega o registro ao sink instalado
    pub fn finish(self) {
        if let Some(sink) = *SINK.read() {
            sink.write_line(self.as_str());
        }
    }
}

// =============================================================================
// EMIT
// =============================================================================

/// Valor que sabe se escrever num [`Record`].
///
/// Inteiros sem sinal saem em hex, com sinal em decimal, texto verbatim.
pub trait Emit {
    fn emit(&self, rec: &mut Record);
}

/// Força a saída decimal de um inteiro sem sinal.
#[derive(Debug, Clone, Copy)]
pub struct Dec(pub u64);

impl Emit for Dec {
    fn emit(&self, rec: &mut Record) {
        rec.push_dec(self.0);
    }
}

impl Emit for str {
    fn emit(&self, rec: &mut Record) {
        rec.push_str(self);
    }
}

impl Emit for alloc::string::String {
    fn emit(&self, rec: &mut Record) {
        rec.push_str(self);
    }
}

impl<T: Emit + ?Sized> Emit for &T {
    fn emit(&self, rec: &mut Record) {
        (**self).emit(rec);
    }
}

macro_rules! emit_unsigned {
    ($($t:ty),*) => {
        $(impl Emit for $t {
            fn emit(&self, rec: &mut Record) {
                rec.push_hex(*self as u64);
            }
        })*
    };
}

macro_rules! emit_signed {
    ($($t:ty),*) => {
        $(impl Emit for $t {
            fn emit(&self, rec: &mut Record) {
                rec.push_signed(*self as i64);
            }
        })*
    };
}

emit_unsigned!(u8, u16, u32, u64, usize);
emit_signed!(i8, i16, i32, i64, isize);

// =============================================================================
// MACROS DE LOG
// =============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __krecord {
    ($prefix:expr; $($part:expr),+) => {{
        let mut __rec = $crate::core::logging::Record::new($prefix);
        $( $crate::core::logging::Emit::emit(&$part, &mut __rec); )+
        __rec.finish();
    }};
}

// kerror! - Sempre ativo (exceto com no_logs)
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_ERROR; $($part),+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// kwarn! - Ativo exceto com no_logs
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_WARN; $($part),+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// kinfo! - Ativo com log_info, log_debug ou log_trace
#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kinfo {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_INFO; $($part),+)
    };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// kdebug! - Ativo com log_debug ou log_trace
#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_DEBUG; $($part),+)
    };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// ktrace! - Ativo apenas com log_trace
#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_TRACE; $($part),+)
    };
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_OK; $($part),+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha (prefixo vermelho [FAIL]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($($part:expr),+ $(,)?) => {
        $crate::__krecord!($crate::core::logging::P_FAIL; $($part),+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}

/// kbug! - ERRO com arquivo e linha de onde a falha foi detectada.
///
/// ```ignore
/// kbug!("(MCP9808)");   // [ERRO] (MCP9808) falha em src/...rs:42
/// ```
#[macro_export]
macro_rules! kbug {
    ($tag:expr) => {
        $crate::kerror!(
            $tag,
            " falha em ",
            file!(),
            ":",
            $crate::core::logging::Dec(line!() as u64)
        )
    };
    ($tag:expr, $($part:expr),+) => {
        $crate::kerror!(
            $tag,
            " falha em ",
            file!(),
            ":",
            $crate::core::logging::Dec(line!() as u64),
            " ",
            $($part),+
        )
    };
}

// =============================================================================
// CAPTURA (testes)
// =============================================================================

/// Sink de teste: guarda as linhas por thread, isolando testes paralelos.
#[cfg(test)]
pub mod capture {
    use super::LogSink;
    use std::cell::RefCell;
    use std::string::{String, ToString};
    use std::vec::Vec;

    std::thread_local! {
        static LINES: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    struct CaptureSink;

    impl LogSink for CaptureSink {
        fn write_line(&self, line: &str) {
            LINES.with(|l| l.borrow_mut().push(line.to_string()));
        }
    }

    static CAPTURE: CaptureSink = CaptureSink;

    /// Instala o sink de captura e limpa o buffer desta thread
    pub fn install() {
        super::set_sink(&CAPTURE);
        LINES.with(|l| l.borrow_mut().clear());
    }

    /// Retira as linhas capturadas nesta thread
    pub fn take() -> Vec<String> {
        LINES.with(|l| core::mem::take(&mut *l.borrow_mut()))
    }
}
