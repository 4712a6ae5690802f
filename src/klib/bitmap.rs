//! Bitmap genérico de tamanho fixo

/// Bitmap para gerenciamento de slots (até `W * 64` bits)
#[derive(Debug, Clone)]
pub struct Bitmap<const W: usize> {
    data: [u64; W],
    len: usize,
}

impl<const W: usize> Bitmap<W> {
    /// Cria bitmap zerado com `bits` posições válidas
    pub const fn new(bits: usize) -> Self {
        let cap = W * 64;
        Self {
            data: [0; W],
            len: if bits < cap { bits } else { cap },
        }
    }

    /// Número de posições válidas
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Define um bit
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.data[index / 64] |= 1 << (index % 64);
    }

    /// Limpa um bit
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.data[index / 64] &= !(1 << (index % 64));
    }

    /// Testa um bit
    pub fn test(&self, index: usize) -> bool {
        index < self.len && (self.data[index / 64] & (1 << (index % 64))) != 0
    }

    /// Quantidade de bits ligados
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Zera todos os bits
    pub fn clear_all(&mut self) {
        self.data = [0; W];
    }

    /// Encontra primeiro bit livre (0)
    pub fn find_first_zero(&self) -> Option<usize> {
        for (i, &word) in self.data.iter().enumerate() {
            if word != u64::MAX {
                let index = i * 64 + word.trailing_ones() as usize;
                if index < self.len {
                    return Some(index);
                }
                return None;
            }
        }
        None
    }
}
