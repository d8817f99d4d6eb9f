/*!
A reader for the AIGER ASCII format.

The header is `aag M I L O A [B C J F]`, followed by input, latch, output, bad and and-gate lines.
Latch lines may give a reset value of `0`, `1`, or the literal of the latch itself (an uninitialised latch).
Symbol table entries and comments are skipped.

AIGER does not require and gates to be listed in a topological order, and so the gates are ordered with [petgraph](petgraph::algo::toposort) before the network is built.
A cycle through and gates is a [CombinationalCycle](ParseError::CombinationalCycle).

Invariant constraints, justice and fairness properties are not supported.

```rust
# use otter_pdr::ntk::aiger::read_aag_str;
// A latch which toggles, starting at 0, with the latch as the bad state.
let network = read_aag_str("aag 1 0 1 0 0 1\n2 3\n2\n").unwrap();
assert_eq!(network.latch_count(), 1);
assert_eq!(network.bads().len(), 1);
```
*/

use std::io::BufRead;

use petgraph::{algo::toposort, graphmap::DiGraphMap};

use crate::{
    misc::log::targets::{self},
    ntk::{builder::NetworkBuilder, Network, Signal},
    types::err::{BuildError, ParseError},
};

struct Header {
    max_var: usize,
    inputs: usize,
    latches: usize,
    outputs: usize,
    ands: usize,
    bads: usize,
}

fn parse_header(line: &str) -> Result<Header, ParseError> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("aag") {
        return Err(ParseError::Header(line.to_string()));
    }
    let numbers = parts
        .map(|part| part.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::Header(line.to_string()))?;

    if numbers.len() < 5 || numbers.len() > 9 {
        return Err(ParseError::Header(line.to_string()));
    }
    if numbers.get(6).is_some_and(|c| *c > 0) {
        return Err(ParseError::Unsupported("invariant constraints"));
    }
    if numbers.get(7).is_some_and(|j| *j > 0) {
        return Err(ParseError::Unsupported("justice properties"));
    }
    if numbers.get(8).is_some_and(|f| *f > 0) {
        return Err(ParseError::Unsupported("fairness constraints"));
    }

    Ok(Header {
        max_var: numbers[0],
        inputs: numbers[1],
        latches: numbers[2],
        outputs: numbers[3],
        ands: numbers[4],
        bads: numbers.get(5).copied().unwrap_or(0),
    })
}

fn parse_literals(line: &str, number: usize, expected: &[usize]) -> Result<Vec<usize>, ParseError> {
    let literals = line
        .split_whitespace()
        .map(|part| part.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::Line(number))?;
    match expected.contains(&literals.len()) {
        true => Ok(literals),
        false => Err(ParseError::Line(number)),
    }
}

/// A table from AIGER variables to signals of the network being built.
struct VariableMap {
    signals: Vec<Option<Signal>>,
}

impl VariableMap {
    fn define(&mut self, variable: usize, signal: Signal) -> Result<(), ParseError> {
        match self.signals[variable] {
            Some(_) => Err(ParseError::Redefinition(variable)),
            None => {
                self.signals[variable] = Some(signal);
                Ok(())
            }
        }
    }

    fn signal(&self, literal: usize) -> Result<Signal, ParseError> {
        match self.signals[literal >> 1] {
            Some(signal) if literal & 1 == 1 => Ok(!signal),
            Some(signal) => Ok(signal),
            None => Err(ParseError::Undefined(literal >> 1)),
        }
    }
}

fn build_error(e: BuildError) -> ParseError {
    match e {
        BuildError::DanglingSignal(node) => ParseError::Undefined(node as usize),
        _ => ParseError::Unsupported("malformed latch"),
    }
}

/// Reads a network in the AIGER ASCII format from `reader`.
pub fn read_aag(reader: impl BufRead) -> Result<Network, ParseError> {
    let mut lines = reader.lines().enumerate();

    let mut next_line = || -> Result<(usize, String), ParseError> {
        match lines.next() {
            Some((number, Ok(line))) => Ok((number + 1, line)),
            Some((_, Err(e))) => Err(ParseError::Io(e.to_string())),
            None => Err(ParseError::Io("unexpected end of input".to_string())),
        }
    };

    let (_, header_line) = next_line()?;
    let header = parse_header(&header_line)?;
    log::info!(target: targets::PARSE, "Header: {header_line}");

    let check_range = |line: usize, literal: usize| match literal >> 1 <= header.max_var {
        true => Ok(()),
        false => Err(ParseError::LiteralRange { line, literal }),
    };

    let mut builder = NetworkBuilder::default();
    let mut map = VariableMap {
        signals: vec![None; header.max_var + 1],
    };
    map.signals[0] = Some(Signal::FALSE);

    for _ in 0..header.inputs {
        let (number, line) = next_line()?;
        let literals = parse_literals(&line, number, &[1])?;
        let literal = literals[0];
        check_range(number, literal)?;
        if literal < 2 || literal & 1 == 1 {
            return Err(ParseError::Line(number));
        }
        let input = builder.add_input();
        map.define(literal >> 1, input)?;
    }

    let mut latch_lines = Vec::with_capacity(header.latches);
    for _ in 0..header.latches {
        let (number, line) = next_line()?;
        let literals = parse_literals(&line, number, &[2, 3])?;
        for literal in &literals {
            check_range(number, *literal)?;
        }
        if literals[0] < 2 || literals[0] & 1 == 1 {
            return Err(ParseError::Line(number));
        }
        let latch = builder.add_latch();
        map.define(literals[0] >> 1, latch)?;
        latch_lines.push((latch, literals));
    }

    let mut output_literals = Vec::with_capacity(header.outputs);
    for _ in 0..header.outputs {
        let (number, line) = next_line()?;
        let literals = parse_literals(&line, number, &[1])?;
        check_range(number, literals[0])?;
        output_literals.push(literals[0]);
    }

    let mut bad_literals = Vec::with_capacity(header.bads);
    for _ in 0..header.bads {
        let (number, line) = next_line()?;
        let literals = parse_literals(&line, number, &[1])?;
        check_range(number, literals[0])?;
        bad_literals.push(literals[0]);
    }

    let mut and_lines = Vec::with_capacity(header.ands);
    let mut and_index = vec![None; header.max_var + 1];
    for _ in 0..header.ands {
        let (number, line) = next_line()?;
        let literals = parse_literals(&line, number, &[3])?;
        for literal in &literals {
            check_range(number, *literal)?;
        }
        let lhs = literals[0];
        if lhs < 2 || lhs & 1 == 1 {
            return Err(ParseError::Line(number));
        }
        if and_index[lhs >> 1].is_some() || map.signals[lhs >> 1].is_some() {
            return Err(ParseError::Redefinition(lhs >> 1));
        }
        and_index[lhs >> 1] = Some(and_lines.len());
        and_lines.push((lhs, literals[1], literals[2]));
    }

    // Order the and gates so each is created after its fan-ins.
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for (lhs, rhs0, rhs1) in &and_lines {
        graph.add_node(lhs >> 1);
        for rhs in [rhs0, rhs1] {
            if and_index[rhs >> 1].is_some() {
                graph.add_edge(rhs >> 1, lhs >> 1, ());
            }
        }
    }
    let order = toposort(&graph, None).map_err(|_| ParseError::CombinationalCycle)?;

    for variable in order {
        let Some(index) = and_index[variable] else {
            continue;
        };
        let (lhs, rhs0, rhs1) = and_lines[index];
        let a = map.signal(rhs0)?;
        let b = map.signal(rhs1)?;
        let gate = builder.add_and(a, b).map_err(build_error)?;
        map.define(lhs >> 1, gate)?;
    }

    for (latch, literals) in latch_lines {
        let next = map.signal(literals[1])?;
        builder.set_next(latch, next).map_err(build_error)?;
        let init = match literals.get(2) {
            None => Signal::FALSE,
            Some(literal) => map.signal(*literal)?,
        };
        builder.set_init(latch, init).map_err(build_error)?;
    }

    for literal in output_literals {
        let signal = map.signal(literal)?;
        builder.add_output(signal).map_err(build_error)?;
    }
    for literal in bad_literals {
        let signal = map.signal(literal)?;
        builder.add_bad(signal).map_err(build_error)?;
    }

    let network = builder.build().map_err(build_error)?;
    log::info!(target: targets::PARSE, "Read {} inputs, {} latches, {} nodes", network.input_count(), network.latch_count(), network.node_count());
    Ok(network)
}

/// Reads a network in the AIGER ASCII format from a string.
pub fn read_aag_str(source: &str) -> Result<Network, ParseError> {
    read_aag(source.as_bytes())
}
