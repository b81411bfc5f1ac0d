//! Embedded category → column table.
//!
//! The table is part of the output contract with downstream consumers. Column
//! names and order must not change without a compatibility review, including
//! the repeated and irregular names some categories carry.

/// Ordered output columns of one category. Index 0 is always the timestamp.
pub type FieldList = &'static [&'static str];

const SCHEMAS: &[(&str, FieldList)] = &[
    (
        "conn",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "proto", "service",
            "duration", "id.orig_ip_bytes", "id.resp_ip_bytes", "conn_state", "local_orig",
            "local_resp", "missed_bytes", "history", "id.orig_pkts", "id.orig_ip_bytes",
            "id.resp_pkts", "id.resp_ip_bytes", "tunnel_parents", "vlan",
        ],
    ),
    (
        "dhcp",
        &[
            "ts", "uids", "client_addr", "server_addr", "mac", "host_name", "client_fqdn", "domain",
            "requested_addr", "assigned_addr", "lease_time", "client_message", "server_message",
            "msg_types", "duration",
        ],
    ),
    (
        "dns",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "proto", "trans_id",
            "rtt", "query", "qclass", "qclass_name", "qtype", "qtype_name", "rcode", "rcode_name",
            "AA", "TC", "RD", "RA", "Z", "answers", "TTLs", "rejected",
        ],
    ),
    (
        "files",
        &[
            "ts", "fuid", "tx_hosts", "rx_hosts", "conn_uids", "source", "depth", "analyzers",
            "mime_type", "filename", "duration", "local_orig", "is_orig", "seen_bytes",
            "total_bytes", "missing_bytes", "overflow_bytes", "timedout", "parent_fuid", "md5",
            "sha1", "sha256", "extracted", "extracted_cutoff", "extracted_size",
        ],
    ),
    (
        "http",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "trans_depth",
            "method", "host", "uri", "referrer", "version", "user_agent", "id.origin",
            "request_body_len", "id.response_body_len", "status_code", "status_msg", "info_code",
            "info_msg", "tags", "username", "password", "proxied", "id.orig_fuids",
            "id.orig_filenames", "id.orig_mime_types", "id.resp_fuids", "id.resp_filenames",
            "id.resp_mime_types",
        ],
    ),
    (
        "ssl",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "version", "cipher",
            "curve", "server_name", "resumed", "last_alert", "next_protocol", "established",
            "cert_chain_fuids", "client_cert_chain_fuids", "subject", "issuer", "client_subject",
            "client_issuer", "validation_status",
        ],
    ),
    (
        "weird",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "name", "addl",
            "notice", "peer",
        ],
    ),
    (
        "x509",
        &[
            "ts", "uid", "version", "serial", "subject", "issuer", "not_valid_before",
            "not_valid_after", "key_alg", "sig_alg", "key_type", "key_length", "exponent", "curve",
            "dns", "uri", "email", "ip", "ca", "path_len",
        ],
    ),
    (
        "ssh",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "version",
            "auth_success", "auth_attempts", "direction", "client", "server", "cipher_alg",
            "mac_alg", "compression_alg", "kex_alg", "host_key_alg", "host_key", "inferences",
        ],
    ),
    (
        "sip",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "trans_depth",
            "method", "uri", "date", "request_fromrequest_to", "id.response_from", "id.response_to",
            "reply_to", "call_id", "seq", "subject", "request_path", "id.response_path",
            "user_agent", "status_code", "status_msg", "warning", "request_body_len",
            "id.response_body_len", "content_type",
        ],
    ),
    (
        "dpd",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "proto", "analyzer",
            "failure_reason", "packet_segment",
        ],
    ),
    (
        "snmp",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "duration", "version",
            "community", "get_requests", "get_bulk_requests", "get_responses", "set_requests",
            "display_string", "up_since",
        ],
    ),
    (
        "smtp",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "trans_depth", "helo",
            "mailfrom",
        ],
    ),
    (
        "pe",
        &[
            "ts", "uid", "machine", "compile_ts", "os", "subsystem", "is_exe", "is_64bit",
            "uses_aslr", "uses_dep",
        ],
    ),
    (
        "tunnel",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "tunnel_type",
            "action",
        ],
    ),
    (
        "socks",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "version", "user",
            "password", "status", "request", "request_host", "request_name", "request_port",
            "bound_host", "bound_name",
        ],
    ),
    (
        "software",
        &[
            "ts", "host", "host_port", "software_type", "name", "major", "minor", "minor2",
            "minor3", "addl", "unparsed_version",
        ],
    ),
    (
        "syslog",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "proto", "facility",
            "severity", "message",
        ],
    ),
    (
        "rfb",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "client_major_version",
            "client_minor_version", "server_major_version", "server_minor_version",
            "authentication_method", "auth", "share_flag", "desktop_name", "width", "height",
        ],
    ),
    (
        "radius",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "username", "mac",
            "remote_ip", "connect_info", "result", "logged",
        ],
    ),
    (
        "rdp",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "cookie", "result",
            "security_protocol", "client_build", "client_name", "client_dig_product_id",
            "desktop_width", "desktop_height", "requested_color_depth", "cert_type", "cert_count",
            "cert_permanent", "encryption_level", "encryption_method",
        ],
    ),
    (
        "ftp",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "user", "password",
            "command", "arg", "mime_type", "file_size", "reply_code", "reply_msg",
            "data_channel.passive", "data_channel.orig_h", "data_channel.resp_h",
            "data_channel.resp_p", "fuid",
        ],
    ),
    (
        "intel",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "indicator",
            "indicator_type", "seen_where", "seen_node", "matched", "sources", "fuid",
            "file_mime_type", "file_desc",
        ],
    ),
    (
        "irc",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "nick", "user",
            "command", "value", "additional_info", "dcc_file_name", "dcc_file_size",
            "dcc_mime_type", "fuid",
        ],
    ),
    (
        "kerberos",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "request_type",
            "client", "service", "success", "error_msg", "from", "till", "cipher", "forwardable",
            "renewable", "client_cert", "client_cert_fuid", "server_cert_subject",
            "server_cert_fuid",
        ],
    ),
    (
        "mysql",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "cmd", "arg",
            "success", "rows", "id.response",
        ],
    ),
    (
        "modbus",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "func", "exception",
        ],
    ),
    (
        "notice",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "fuid", "mime", "desc",
            "proto", "note", "msg", "sub", "src", "dst", "p", "n", "peer_descr", "actions",
            "suppress_for", "dropped", "destination_country_code", "destination_region",
            "destination_city", "destination_latitude", "destination_longitude",
        ],
    ),
    (
        "signature",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "note", "sig_id",
            "event_msg", "sub_msg", "sig_count", "host_count",
        ],
    ),
    (
        "smb_mapping",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "path", "service",
            "native_file_system", "share_type",
        ],
    ),
    (
        "smb_files",
        &[
            "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "fuid", "action",
            "path", "name", "size", "prev_name", "modified", "accessed", "created", "changed",
        ],
    ),
    (
        "zeekdnp3",
        &[
            "ts", "uid", "id", "fc_request", "fc_reply", "iin",
        ],
    ),
];

/// Look up the columns of `category`. Category names are case-sensitive.
pub fn fields_for(category: &str) -> Option<FieldList> {
    SCHEMAS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, fields)| *fields)
}

/// All known categories with their columns, in table order.
pub fn categories() -> impl Iterator<Item = (&'static str, FieldList)> {
    SCHEMAS.iter().copied()
}

/// Number of known categories.
pub fn len() -> usize {
    SCHEMAS.len()
}
