//! Codec do registrador T_A
//!
//! ```text
//!  15  14  13  12  11 ........ 4  3  2  1  0
//! ┌───┬───┬───┬────┬──────────────┬──────────┐
//! │ flags(3)  │sinal│ inteiro (8) │ fração/16│
//! └───┴───┴───┴────┴──────────────┴──────────┘
//! ```
//!
//! Os bits de flag (alarmes) são ignorados. Com o bit de sinal ligado o
//! valor é `256 - (raw & 0x0FFF) / 16`, sem validação de faixa: toda
//! palavra de 16 bits decodifica.

use crate::core::logging::{Emit, Record};
use core::fmt;

/// Bit de sinal
pub const SIGN_BIT: u16 = 0x1000;
/// Magnitude (12 bits, em 1/16 °C)
pub const MAGNITUDE_MASK: u16 = 0x0FFF;
/// Bits significativos da temperatura
pub const TEMP_MASK: u16 = 0x1FFF;

/// Passos de 1/16 °C por grau
pub const STEPS_PER_DEGREE: i32 = 16;

/// Temperatura em passos de 1/16 °C
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Celsius(i32);

impl Celsius {
    pub const ZERO: Self = Self(0);

    pub const fn from_sixteenths(steps: i32) -> Self {
        Self(steps)
    }

    pub const fn sixteenths(self) -> i32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / STEPS_PER_DEGREE as f32
    }

    /// Dígitos decimais da fração (0..=4), sem zeros à direita; ao menos 1
    fn fraction_digits(self) -> ([u8; 4], usize) {
        let mut frac = (self.0.unsigned_abs() % 16) * 625;
        let mut len = 4;
        while len > 1 && frac % 10 == 0 {
            frac /= 10;
            len -= 1;
        }

        let mut digits = [b'0'; 4];
        for slot in digits[..len].iter_mut().rev() {
            *slot = b'0' + (frac % 10) as u8;
            frac /= 10;
        }
        (digits, len)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.", sign, self.0.unsigned_abs() / 16)?;
        let (digits, len) = self.fraction_digits();
        for d in &digits[..len] {
            write!(f, "{}", *d as char)?;
        }
        Ok(())
    }
}

impl Emit for Celsius {
    fn emit(&self, rec: &mut Record) {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

        if self.0 < 0 {
            rec.push_str("-");
        }
        rec.push_dec((self.0.unsigned_abs() / 16) as u64);
        rec.push_str(".");
        let (digits, len) = self.fraction_digits();
        for d in &digits[..len] {
            rec.push_str(DIGITS[(d - b'0') as usize]);
        }
    }
}

/// Converte a palavra crua do registrador em temperatura
pub const fn decode(raw: u16) -> Celsius {
    if raw & SIGN_BIT != 0 {
        Celsius(256 * STEPS_PER_DEGREE - (raw & MAGNITUDE_MASK) as i32)
    } else {
        Celsius((raw & TEMP_MASK) as i32)
    }
}

/// Inverso de [`decode`] para a faixa que ele produz
///
/// `decode` só gera valores em [0, 256]; fora disso não há palavra que
/// decodifique para a temperatura pedida.
pub const fn encode(temp: Celsius) -> Option<u16> {
    let steps = temp.0;
    if steps >= 0 && steps <= MAGNITUDE_MASK as i32 {
        Some(steps as u16)
    } else if steps == 256 * STEPS_PER_DEGREE {
        Some(SIGN_BIT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_boundaries() {
        assert_eq!(decode(0x0000), Celsius::ZERO);
        assert_eq!(decode(0x0050).as_f32(), 5.0);
        assert_eq!(decode(0x1000).as_f32(), 256.0);
        assert_eq!(decode(0x1001).as_f32(), 255.9375);
        // 256 - 0xFFF/16: o ramo negativo nunca fica abaixo de 1/16
        assert_eq!(decode(0x1FFF).as_f32(), 0.0625);
        assert_eq!(decode(0x0FFF).as_f32(), 255.9375);
    }

    #[test]
    fn test_flag_bits_ignored() {
        for raw in [0x0000u16, 0x0050, 0x0FFF, 0x1000, 0x1ABC, 0x1FFF] {
            for flags in [0x2000u16, 0x4000, 0x8000, 0xE000] {
                assert_eq!(decode(raw | flags), decode(raw));
            }
        }
    }

    #[test]
    fn test_total_over_all_words() {
        for raw in 0..=u16::MAX {
            let t = decode(raw).sixteenths();
            assert!((0..=4096).contains(&t), "raw={:#x} -> {}", raw, t);
            assert_eq!(decode(raw), decode(raw & TEMP_MASK));
        }
    }

    #[test]
    fn test_encode_then_decode() {
        for steps in 0..=4096 {
            let t = Celsius::from_sixteenths(steps);
            let raw = encode(t).expect("faixa representável");
            assert_eq!(decode(raw), t);
        }
        assert_eq!(encode(Celsius::from_sixteenths(-1)), None);
        assert_eq!(encode(Celsius::from_sixteenths(4097)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(decode(0x0050).to_string(), "5.0");
        assert_eq!(decode(0x0194).to_string(), "25.25");
        assert_eq!(decode(0x0001).to_string(), "0.0625");
        assert_eq!(decode(0x1001).to_string(), "255.9375");
        assert_eq!(Celsius::from_sixteenths(-24).to_string(), "-1.5");
    }

    #[test]
    fn test_emit_matches_display() {
        for steps in [-24, 0, 1, 80, 404, 4095] {
            let t = Celsius::from_sixteenths(steps);
            let mut rec = Record::new("");
            t.emit(&mut rec);
            assert_eq!(rec.as_str(), t.to_string());
        }
    }
}
