//! Minimal ONNX `ModelProto` writer.
//!
//! Hand-rolled protobuf encoding (varint + length-delimited fields) for the
//! model envelope: IR version, opset import, producer, and the graph's
//! declared inputs and outputs with their dynamic axes.

use std::io;
use std::path::Path;

/// ONNX IR version written into the envelope. IR 8 covers opset 14.
const IR_VERSION: u64 = 8;

/// Tensor element types (onnx `TensorProto.DataType`).
pub const ELEM_FLOAT: u64 = 1;
pub const ELEM_INT64: u64 = 7;

/// One axis of a declared tensor: a fixed length or a named dynamic axis.
#[derive(Debug, Clone)]
pub enum Dim {
    Fixed(u64),
    Dynamic(&'static str),
}

/// A graph input or output declaration.
#[derive(Debug, Clone)]
pub struct ValueDecl {
    pub name: String,
    pub elem_type: u64,
    pub dims: Vec<Dim>,
}

// Protobuf wire types.
const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

fn put_key(buf: &mut Vec<u8>, field: u64, wire: u64) {
    put_varint(buf, (field << 3) | wire);
}

fn put_varint_field(buf: &mut Vec<u8>, field: u64, value: u64) {
    put_key(buf, field, WIRE_VARINT);
    put_varint(buf, value);
}

fn put_len_field(buf: &mut Vec<u8>, field: u64, bytes: &[u8]) {
    put_key(buf, field, WIRE_LEN);
    put_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn put_string_field(buf: &mut Vec<u8>, field: u64, value: &str) {
    put_len_field(buf, field, value.as_bytes());
}

/// TensorShapeProto.Dimension: dim_value=1, dim_param=2.
fn encode_dim(dim: &Dim) -> Vec<u8> {
    let mut buf = Vec::new();
    match dim {
        Dim::Fixed(value) => put_varint_field(&mut buf, 1, *value),
        Dim::Dynamic(name) => put_string_field(&mut buf, 2, name),
    }
    buf
}

/// ValueInfoProto: name=1, type=2. TypeProto: tensor_type=1.
/// TypeProto.Tensor: elem_type=1, shape=2. TensorShapeProto: dim=1.
fn encode_value_info(decl: &ValueDecl) -> Vec<u8> {
    let mut shape = Vec::new();
    for dim in &decl.dims {
        put_len_field(&mut shape, 1, &encode_dim(dim));
    }

    let mut tensor = Vec::new();
    put_varint_field(&mut tensor, 1, decl.elem_type);
    put_len_field(&mut tensor, 2, &shape);

    let mut type_proto = Vec::new();
    put_len_field(&mut type_proto, 1, &tensor);

    let mut value_info = Vec::new();
    put_string_field(&mut value_info, 1, &decl.name);
    put_len_field(&mut value_info, 2, &type_proto);
    value_info
}

/// GraphProto: name=2, input=11, output=12.
fn encode_graph(name: &str, inputs: &[ValueDecl], outputs: &[ValueDecl]) -> Vec<u8> {
    // TODO: emit the traced node graph and initializers once a tracing
    // backend is wired in; the envelope declares the interface only.
    let mut graph = Vec::new();
    put_string_field(&mut graph, 2, name);
    for input in inputs {
        put_len_field(&mut graph, 11, &encode_value_info(input));
    }
    for output in outputs {
        put_len_field(&mut graph, 12, &encode_value_info(output));
    }
    graph
}

/// Serialize a `ModelProto` envelope and write it to `out`.
///
/// ModelProto: ir_version=1, producer_name=2, producer_version=3, graph=7,
/// opset_import=8. OperatorSetIdProto: domain=1 (default), version=2.
pub fn write_model(
    out: &Path,
    graph_name: &str,
    opset: u64,
    inputs: &[ValueDecl],
    outputs: &[ValueDecl],
) -> io::Result<()> {
    let mut opset_import = Vec::new();
    put_varint_field(&mut opset_import, 2, opset);

    let mut model = Vec::new();
    put_varint_field(&mut model, 1, IR_VERSION);
    put_string_field(&mut model, 2, "exportar");
    put_string_field(&mut model, 3, env!("CARGO_PKG_VERSION"));
    put_len_field(&mut model, 7, &encode_graph(graph_name, inputs, outputs));
    put_len_field(&mut model, 8, &opset_import);

    std::fs::write(out, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_input(name: &str) -> ValueDecl {
        ValueDecl {
            name: name.to_string(),
            elem_type: ELEM_INT64,
            dims: vec![Dim::Dynamic("batch_size"), Dim::Dynamic("sequence_length")],
        }
    }

    #[test]
    fn test_varint_encoding() {
        let mut buf = Vec::new();
        put_varint(&mut buf, 0);
        assert_eq!(buf, [0x00]);

        buf.clear();
        put_varint(&mut buf, 14);
        assert_eq!(buf, [0x0e]);

        buf.clear();
        put_varint(&mut buf, 300);
        assert_eq!(buf, [0xac, 0x02]);
    }

    #[test]
    fn test_value_info_starts_with_name_field() {
        let encoded = encode_value_info(&int_input("input_ids"));
        // field 1, wire 2, then length-prefixed name
        assert_eq!(encoded[0], 0x0a);
        assert_eq!(encoded[1] as usize, "input_ids".len());
        assert_eq!(&encoded[2..11], b"input_ids");
    }

    #[test]
    fn test_model_envelope_written() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("model.onnx");

        let inputs = vec![int_input("input_ids"), int_input("attention_mask")];
        let outputs = vec![ValueDecl {
            name: "logits".into(),
            elem_type: ELEM_FLOAT,
            dims: vec![
                Dim::Dynamic("batch_size"),
                Dim::Dynamic("sequence_length"),
                Dim::Fixed(2),
            ],
        }];

        write_model(&out, "torch_jit", 14, &inputs, &outputs).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        // ir_version field: key 0x08, value 8
        assert_eq!(&bytes[..2], &[0x08, 0x08]);
        // producer and declared tensor names survive verbatim
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("exportar"));
        assert!(haystack.contains("input_ids"));
        assert!(haystack.contains("logits"));
        assert!(haystack.contains("sequence_length"));
    }

    #[test]
    fn test_fixed_dim_encoded_as_value() {
        let encoded = encode_dim(&Dim::Fixed(512));
        // field 1, wire 0, varint 512
        assert_eq!(encoded[0], 0x08);
        assert_eq!(&encoded[1..], &[0x80, 0x04]);
    }
}
