// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 23](https://adventofcode.com/2019/day/23): Category Six
//!
//! Fifty network interface controllers, each running its own copy of the program, are advanced
//! one instruction at a time in turn. A controller that reads from an empty queue is given `-1`
//! rather than being suspended, and packets sent during a sweep are delivered once it's over.

use super::PuzzleError;
use crate::{Interpreter, State, StepOutcome};

const NIC_COUNT: usize = 50;
const NAT_ADDRESS: i64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Packet {
    x: i64,
    y: i64,
}

#[derive(Debug)]
struct Nic {
    interp: Interpreter,
    /// Whether the controller has found its queue empty since it last sent or received a packet
    idle: bool,
}

#[derive(Debug)]
struct Network {
    nics: Vec<Nic>,
    /// The last packet sent to the NAT
    nat: Option<Packet>,
}

impl Network {
    /// Boot every controller, each with its network address as its first input
    fn new(program: &[i64]) -> Self {
        let nics = (0..NIC_COUNT as i64)
            .map(|address| {
                let mut interp = Interpreter::new(program.iter().copied());
                interp.push_input(address);
                Nic {
                    interp,
                    idle: false,
                }
            })
            .collect();
        Self { nics, nat: None }
    }

    fn deliver(&mut self, address: i64, packet: Packet) -> Result<(), PuzzleError> {
        let nic = usize::try_from(address)
            .ok()
            .and_then(|i| self.nics.get_mut(i))
            .ok_or(PuzzleError::InvalidPacketAddress(address))?;
        nic.interp.extend_input([packet.x, packet.y]);
        nic.idle = false;
        Ok(())
    }

    /// Advance every running controller by a single instruction, then deliver the packets they
    /// sent. Returns the packets that were sent to the NAT.
    fn sweep(&mut self) -> Result<Vec<Packet>, PuzzleError> {
        let mut sent = Vec::new();
        let mut running = 0;
        for nic in &mut self.nics {
            match nic.interp.tick()? {
                StepOutcome::Running => {}
                StepOutcome::Stopped(State::Awaiting) => {
                    nic.interp.push_input(-1);
                    nic.idle = true;
                }
                StepOutcome::Stopped(State::Halted) => continue,
            }
            running += 1;
            if nic.interp.pending_output() == 3 {
                let out = nic.interp.take_output();
                sent.push((out[0], Packet { x: out[1], y: out[2] }));
                nic.idle = false;
            }
        }
        if running == 0 {
            return Err(PuzzleError::NoSolution);
        }

        let mut to_nat = Vec::new();
        for (address, packet) in sent {
            log::trace!("packet {packet:?} sent to {address}");
            if address == NAT_ADDRESS {
                self.nat = Some(packet);
                to_nat.push(packet);
            } else {
                self.deliver(address, packet)?;
            }
        }
        Ok(to_nat)
    }

    /// Whether every controller that's still running is waiting on packets that aren't coming
    fn is_idle(&self) -> bool {
        self.nics.iter().all(|nic| nic.idle || nic.interp.is_halted())
    }
}

/// The Y value of the first packet sent to address 255
pub fn part1(program: &[i64]) -> Result<i64, PuzzleError> {
    let mut network = Network::new(program);
    loop {
        if let Some(packet) = network.sweep()?.first() {
            return Ok(packet.y);
        }
        if network.is_idle() {
            return Err(PuzzleError::StalledOnInput);
        }
    }
}

/// The first Y value delivered by the NAT to address 0 twice in a row
pub fn part2(program: &[i64]) -> Result<i64, PuzzleError> {
    let mut network = Network::new(program);
    let mut last_y = None;
    loop {
        network.sweep()?;
        if network.is_idle() {
            let packet = network.nat.ok_or(PuzzleError::StalledOnInput)?;
            log::debug!("network idle, NAT sending {packet:?} to 0");
            if last_y == Some(packet.y) {
                return Ok(packet.y);
            }
            last_y = Some(packet.y);
            network.deliver(0, packet)?;
        }
    }
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    Ok((part1(program)?, part2(program)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Announces `(address, address + 100)` to the NAT on boot, then forwards every packet it
    /// receives to the NAT
    const FORWARDER: [i64; 32] = [
        3, 100, 1001, 100, 100, 101, 104, 255, 4, 100, 4, 101, 3, 102, 1008, 102, -1, 103, 1005,
        103, 12, 3, 104, 104, 255, 4, 102, 4, 104, 1105, 1, 12,
    ];

    #[test]
    fn first_packet_to_the_nat() {
        assert_eq!(part1(&FORWARDER), Ok(100));
    }

    #[test]
    fn nat_repeats_itself() {
        assert_eq!(part2(&FORWARDER), Ok(149));
    }

    #[test]
    fn packets_reach_their_destination() {
        // address 0 sends (7, 8) to address 49, which forwards whatever it reads to the NAT
        let code = [
            3, 100, 1005, 100, 14, 104, 49, 104, 7, 104, 8, 1105, 1, 11, 3, 101, 1008, 101, -1,
            102, 1005, 102, 14, 3, 103, 104, 255, 4, 101, 4, 103, 99,
        ];
        assert_eq!(part1(&code), Ok(8));
    }

    #[test]
    fn network_failures() {
        assert_eq!(
            part1(&[3, 100, 104, 77, 104, 0, 104, 0, 99]),
            Err(PuzzleError::InvalidPacketAddress(77))
        );
        assert_eq!(part1(&[99]), Err(PuzzleError::NoSolution));
        // polls forever without sending anything
        let silent = [3, 100, 3, 101, 1105, 1, 2];
        assert_eq!(part1(&silent), Err(PuzzleError::StalledOnInput));
        assert_eq!(part2(&silent), Err(PuzzleError::StalledOnInput));
    }
}
