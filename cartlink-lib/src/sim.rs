//! In-memory stand-in for the cartridge reader.
//!
//! [`SimulatedCartridge`] behaves like the reader firmware with a cartridge
//! inserted: it waits for the `0xCA` prefix, answers the four commands and
//! acknowledges flash chunks and banks. Reads never block; when there is
//! nothing left to send they return end of stream, which the protocol layer
//! sees as a short read.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use cartlink_core::{BANK_SIZE, BLOCK_SIZE, HEADER_SIZE, ram_bank_count, rom_block_count};

use crate::command::{COMMAND_PREFIX, Command};
use crate::writer::{BANK_ACK, CHUNK_ACK, CHUNK_SIZE, CHUNKS_PER_BANK};

/// Cartridge address of the header region.
const HEADER_ADDRESS: usize = 0x0100;

/// Value read back from addresses the cartridge does not back.
const OPEN_BUS: u8 = 0xFF;

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeviceState {
    /// Discarding bytes until a command prefix arrives
    Idle,
    /// Prefix seen, next byte is the command code
    AwaitingCode,
    /// Receiving RAM contents
    Flashing {
        bank: usize,
        chunk: usize,
        banks: usize,
        buffer: Vec<u8>,
    },
}

/// A simulated reader with a cartridge inserted.
#[derive(Debug, Clone)]
pub struct SimulatedCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    state: DeviceState,
    outbox: VecDeque<u8>,
    commands: Vec<Command>,
}

impl SimulatedCartridge {
    /// Insert a cartridge with the given ROM image and RAM contents.
    ///
    /// The header is taken from the ROM image at 0x0100, exactly as the
    /// firmware reads it from the cartridge.
    pub fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            state: DeviceState::Idle,
            outbox: VecDeque::new(),
            commands: Vec::new(),
        }
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Bytes queued for the host but not yet read.
    pub fn pending_output(&self) -> usize {
        self.outbox.len()
    }

    fn header_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        for (i, b) in header.iter_mut().enumerate() {
            *b = self.rom.get(HEADER_ADDRESS + i).copied().unwrap_or(0);
        }
        header
    }

    fn header_byte(&self, offset: usize) -> u8 {
        self.rom.get(HEADER_ADDRESS + offset).copied().unwrap_or(0)
    }

    fn stream(&mut self, source_len: usize, from_ram: bool) {
        let source = if from_ram { &self.ram } else { &self.rom };
        self.outbox
            .extend((0..source_len).map(|i| source.get(i).copied().unwrap_or(OPEN_BUS)));
    }

    fn dispatch(&mut self, code: u8) -> DeviceState {
        let Some(command) = Command::from_code(code) else {
            return DeviceState::Idle;
        };
        self.commands.push(command);

        let rom_size_code = self.header_byte(0x48);
        let ram_size_code = self.header_byte(0x49);

        match command {
            Command::DumpHeader => {
                let header = self.header_bytes();
                self.outbox.extend(header);
                DeviceState::Idle
            }
            Command::DumpRom => {
                self.stream(rom_block_count(rom_size_code) * BLOCK_SIZE, false);
                DeviceState::Idle
            }
            Command::DumpRam => {
                self.stream(ram_bank_count(ram_size_code) * BANK_SIZE, true);
                DeviceState::Idle
            }
            Command::FlashRam => {
                let banks = ram_bank_count(ram_size_code);
                if banks == 0 {
                    DeviceState::Idle
                } else {
                    DeviceState::Flashing {
                        bank: 0,
                        chunk: 0,
                        banks,
                        buffer: Vec::with_capacity(CHUNK_SIZE),
                    }
                }
            }
        }
    }

    fn store_chunk(&mut self, bank: usize, chunk: usize, data: &[u8]) {
        let start = bank * BANK_SIZE + chunk * CHUNK_SIZE;
        let end = start + data.len();
        if self.ram.len() < end {
            self.ram.resize(end, OPEN_BUS);
        }
        self.ram[start..end].copy_from_slice(data);
    }

    fn receive(&mut self, byte: u8) {
        let state = std::mem::replace(&mut self.state, DeviceState::Idle);
        self.state = match state {
            DeviceState::Idle if byte == COMMAND_PREFIX => DeviceState::AwaitingCode,
            DeviceState::Idle => DeviceState::Idle,
            DeviceState::AwaitingCode => self.dispatch(byte),
            DeviceState::Flashing {
                mut bank,
                mut chunk,
                banks,
                mut buffer,
            } => {
                buffer.push(byte);
                if buffer.len() < CHUNK_SIZE {
                    DeviceState::Flashing {
                        bank,
                        chunk,
                        banks,
                        buffer,
                    }
                } else {
                    self.store_chunk(bank, chunk, &buffer);
                    buffer.clear();
                    self.outbox.push_back(CHUNK_ACK);
                    chunk += 1;
                    if chunk == CHUNKS_PER_BANK {
                        self.outbox.push_back(BANK_ACK);
                        chunk = 0;
                        bank += 1;
                    }
                    if bank == banks {
                        DeviceState::Idle
                    } else {
                        DeviceState::Flashing {
                            bank,
                            chunk,
                            banks,
                            buffer,
                        }
                    }
                }
            }
        };
    }
}

impl Read for SimulatedCartridge {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.outbox.len());
        for (dst, src) in buf.iter_mut().zip(self.outbox.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

impl Write for SimulatedCartridge {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            self.receive(b);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
