use crate::bencode::Element;

pub fn encode(element: &Element) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(element, &mut out);
    out
}

pub fn encode_into(element: &Element, out: &mut Vec<u8>) {
    match element {
        Element::Integer(value) => {
            out.push(b'i');
            out.extend_from_slice(value.to_string().as_bytes());
            out.push(b'e');
        }
        Element::Bytes(bytes) => write_string(bytes, out),
        Element::List(items) => {
            out.push(b'l');
            for item in items {
                encode_into(item, out);
            }
            out.push(b'e');
        }
        Element::Dictionary(dictionary) => {
            out.push(b'd');
            for (key, value) in dictionary.iter() {
                write_string(key, out);
                encode_into(value, out);
            }
            out.push(b'e');
        }
    }
}

fn write_string(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}
