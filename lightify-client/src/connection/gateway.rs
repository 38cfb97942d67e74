//! Gateway connection and transaction engine
//!
//! # Architecture
//!
//! [`GatewayClient`] owns the transport, the request token counter and the
//! node/group caches. Every public operation runs one full request/answer
//! exchange on the stream before it returns:
//!
//! 1. advance the token counter and encode the request telegram
//! 2. write the telegram and flush
//! 3. read the 8-byte answer header, verify opcode and token
//! 4. read the answer body (fixed size, count-derived for scan records,
//!    two-phase for node updates)
//! 5. decode, verify the echoed address where present, map the status
//!    byte and apply the result to the caches
//!
//! There is no pipelining; `&mut self` keeps a second exchange from
//! starting while one is in flight. Dropping an operation future between
//! write and read leaves unread answer bytes on the stream, as does any
//! protocol error. After either, close the connection and reopen it.
//!
//! # Cache semantics
//!
//! Set commands write their values into the cache optimistically, also
//! when the gateway reports a device-level failure; in that case the
//! affected entries are marked stale on top. Transport and protocol
//! failures leave the caches untouched, with one exception: scans clear
//! their cache before any I/O, so a failed scan yields an empty cache
//! rather than a stale-looking one.

use lightify_core::{
    GroupRegistry, LightifyError, LightifyResult, Node, NodeAddress, NodeRegistry,
};
use lightify_protocol::answer::{
    GROUP_RECORD_LENGTH, GROUP_SCAN_PREFIX_LENGTH, GroupScanPrefix, NODE_SCAN_PREFIX_LENGTH,
    NodeScanPrefix, SET_ANSWER_LENGTH, SetAnswer, UPDATE_BODY_LENGTH, UpdateBody,
    decode_group_record, decode_node_record,
};
use lightify_protocol::telegram::{TELEGRAM_HEADER_LENGTH, TelegramHeader};
use lightify_protocol::version::SCAN_LENGTH_OVERHEAD;
use lightify_protocol::{Opcode, ProtocolVersion, Target, decode_status, request};
use lightify_transport::Transport;
use log::{debug, info};

/// Connection to one gateway.
///
/// Generic over the transport so tests and embedders can supply their own
/// byte stream; [`crate::connection::GatewayBuilder`] wires up the usual
/// TCP case.
#[derive(Debug)]
pub struct GatewayClient<T: Transport> {
    transport: T,
    token: u32,
    nodes: NodeRegistry,
    groups: GroupRegistry,
    protocol_version: Option<ProtocolVersion>,
}

impl<T: Transport> GatewayClient<T> {
    /// Creates a client over an unopened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: 0,
            nodes: NodeRegistry::new(),
            groups: GroupRegistry::new(),
            protocol_version: None,
        }
    }

    /// Open the connection to the gateway
    pub async fn open(&mut self) -> LightifyResult<()> {
        self.transport.open().await
    }

    /// Close the connection
    pub async fn close(&mut self) -> LightifyResult<()> {
        self.transport.close().await
    }

    /// Check if the underlying transport is closed
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Nodes known from the last scan.
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    /// Groups known from the last group scan.
    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Wire-layout revision detected by the last non-empty node scan,
    /// `None` before that.
    pub fn protocol_version(&self) -> Option<ProtocolVersion> {
        self.protocol_version
    }

    /// Queries the gateway's node list and replaces the node cache.
    ///
    /// The cache is cleared before any byte goes out; if the scan fails,
    /// it stays empty. A non-empty scan also re-detects the protocol
    /// revision from the answer's length arithmetic.
    ///
    /// # Returns
    ///
    /// The number of nodes reported.
    pub async fn scan_nodes(&mut self) -> LightifyResult<usize> {
        self.nodes.clear();

        let token = self.next_token();
        self.send(&request::scan_nodes(token)).await?;
        let header = self.read_answer_header(Opcode::ScanNodes, token).await?;

        let prefix_bytes = self.read_body(NODE_SCAN_PREFIX_LENGTH).await?;
        let prefix = NodeScanPrefix::decode(&prefix_bytes)?;
        if prefix.reserved() != 0 {
            debug!("Scan answer reserved byte is 0x{:02x}", prefix.reserved());
        }

        let count = prefix.count();
        if count == 0 {
            if header.length() != SCAN_LENGTH_OVERHEAD {
                return Err(LightifyError::Protocol(format!(
                    "Scan answer length {} does not match zero nodes",
                    header.length()
                )));
            }
            info!("Gateway reports no nodes");
            return Ok(0);
        }

        let version = ProtocolVersion::detect(count, header.length())?;
        self.protocol_version = Some(version);

        let mut fresh = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let record = self.read_body(version.node_record_length()).await?;
            fresh.push(decode_node_record(version, &record)?);
        }

        info!("Scan found {} nodes", fresh.len());
        self.nodes.replace_all(fresh);
        Ok(count as usize)
    }

    /// Queries the gateway's group list and replaces the group cache.
    ///
    /// Like the node scan, the cache is cleared up front and stays empty
    /// if anything fails.
    ///
    /// # Returns
    ///
    /// The number of groups reported.
    pub async fn scan_groups(&mut self) -> LightifyResult<usize> {
        self.groups.clear();

        let token = self.next_token();
        self.send(&request::scan_groups(token)).await?;
        self.read_answer_header(Opcode::ScanGroups, token).await?;

        let prefix_bytes = self.read_body(GROUP_SCAN_PREFIX_LENGTH).await?;
        let prefix = GroupScanPrefix::decode(&prefix_bytes)?;
        decode_status(prefix.status())?;

        let count = prefix.count();
        let mut fresh = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let record = self.read_body(GROUP_RECORD_LENGTH).await?;
            fresh.push(decode_group_record(&record)?);
        }

        info!("Scan found {} groups", fresh.len());
        self.groups.replace_all(fresh);
        Ok(count as usize)
    }

    /// Switches the target on or off.
    ///
    /// Accepts every target kind: a single node, a group (resolved on the
    /// gateway) or [`Target::Broadcast`] for everything at once. The
    /// cached power state of all addressed nodes is updated.
    pub async fn set_on_off(&mut self, target: Target, on: bool) -> LightifyResult<()> {
        let token = self.next_token();
        let telegram = request::set_on_off(token, target, on);
        let status = self
            .exchange_set(Opcode::SetOnOff, &telegram, token, target.address_value())
            .await?;

        let result = decode_status(status);
        let failed = result.is_err();
        self.for_each_addressed(target, |node| {
            node.set_power(on);
            if failed {
                node.set_stale(true);
            }
        });
        result
    }

    /// Sets the brightness (0..=100) with a fade time in tenths of a
    /// second.
    ///
    /// The gateway treats level 0 as off and anything else as on, so the
    /// cached power state follows the level. Broadcast is not supported
    /// by this command.
    pub async fn set_brightness(
        &mut self,
        target: Target,
        level: u8,
        fade_time: u16,
    ) -> LightifyResult<()> {
        Self::reject_broadcast(target)?;

        let token = self.next_token();
        let telegram = request::set_brightness(token, target, level, fade_time);
        let status = self
            .exchange_set(Opcode::SetBrightness, &telegram, token, target.address_value())
            .await?;

        let result = decode_status(status);
        let failed = result.is_err();
        self.for_each_addressed(target, |node| {
            node.set_brightness(level);
            node.set_power(level != 0);
            if failed {
                node.set_stale(true);
            }
        });
        result
    }

    /// Sets the color temperature in Kelvin with a fade time in tenths of
    /// a second. Broadcast is not supported by this command.
    pub async fn set_cct(&mut self, target: Target, cct: u16, fade_time: u16) -> LightifyResult<()> {
        Self::reject_broadcast(target)?;

        let token = self.next_token();
        let telegram = request::set_cct(token, target, cct, fade_time);
        let status = self
            .exchange_set(Opcode::SetCct, &telegram, token, target.address_value())
            .await?;

        let result = decode_status(status);
        let failed = result.is_err();
        self.for_each_addressed(target, |node| {
            node.set_cct(cct);
            if failed {
                node.set_stale(true);
            }
        });
        result
    }

    /// Sets the four color channels with a fade time in tenths of a
    /// second. Broadcast is not supported by this command.
    pub async fn set_rgbw(
        &mut self,
        target: Target,
        red: u8,
        green: u8,
        blue: u8,
        white: u8,
        fade_time: u16,
    ) -> LightifyResult<()> {
        Self::reject_broadcast(target)?;

        let token = self.next_token();
        let telegram = request::set_rgbw(token, target, red, green, blue, white, fade_time);
        let status = self
            .exchange_set(Opcode::SetRgbw, &telegram, token, target.address_value())
            .await?;

        let result = decode_status(status);
        let failed = result.is_err();
        self.for_each_addressed(target, |node| {
            node.set_rgbw(red, green, blue, white);
            if failed {
                node.set_stale(true);
            }
        });
        result
    }

    /// Fetches the live state of one cached node.
    ///
    /// On success the entry's online/power/brightness/CCT/RGBW fields are
    /// refreshed and its stale flag cleared. If the node does not answer,
    /// the gateway sends a bare nonzero status; the entry is then marked
    /// stale and the call returns [`LightifyError::NoData`].
    pub async fn update_node(&mut self, address: NodeAddress) -> LightifyResult<()> {
        if self.nodes.by_address(address).is_none() {
            return Err(LightifyError::InvalidInput(format!(
                "Node {address} is not in the cache"
            )));
        }

        let token = self.next_token();
        self.send(&request::update_node(token, address)).await?;
        self.read_answer_header(Opcode::UpdateNode, token).await?;

        // The status byte decides whether a body follows at all.
        let status = self.read_body(1).await?[0];
        if status != 0 {
            debug!("Node {address} did not answer the update, status 0x{status:02x}");
            if let Some(node) = self.nodes.by_address_mut(address) {
                node.set_stale(true);
            }
            return Err(LightifyError::NoData);
        }

        let body = self.read_body(UPDATE_BODY_LENGTH).await?;
        let update = UpdateBody::decode(&body)?;
        update.verify_address(address)?;

        if let Some(node) = self.nodes.by_address_mut(address) {
            update.apply_to(node);
        }
        Ok(())
    }

    fn next_token(&mut self) -> u32 {
        self.token = self.token.wrapping_add(1);
        self.token
    }

    fn reject_broadcast(target: Target) -> LightifyResult<()> {
        if matches!(target, Target::Broadcast) {
            return Err(LightifyError::InvalidInput(
                "This command cannot be broadcast".into(),
            ));
        }
        Ok(())
    }

    /// Runs the mutation on every cached node the target addresses.
    fn for_each_addressed<F: FnMut(&mut Node)>(&mut self, target: Target, mut f: F) {
        match target {
            Target::Broadcast => {
                for node in self.nodes.iter_mut() {
                    f(node);
                }
            }
            Target::Node(address) => {
                if let Some(node) = self.nodes.by_address_mut(address) {
                    f(node);
                }
            }
            Target::Group(id) => {
                for node in self.nodes.in_group_mut(id) {
                    f(node);
                }
            }
        }
    }

    async fn send(&mut self, telegram: &[u8]) -> LightifyResult<()> {
        debug!("Sending {} bytes", telegram.len());
        self.transport.write_all(telegram).await?;
        self.transport.flush().await
    }

    /// Reads and validates the answer header of the exchange identified by
    /// `opcode` and `token`.
    async fn read_answer_header(
        &mut self,
        opcode: Opcode,
        token: u32,
    ) -> LightifyResult<TelegramHeader> {
        let mut buf = [0u8; TELEGRAM_HEADER_LENGTH];
        self.transport.read_exact(&mut buf).await?;
        let header = TelegramHeader::decode(&buf)?;

        if header.opcode() != opcode.code() {
            return Err(LightifyError::Protocol(format!(
                "Answer opcode 0x{:02x} does not match request 0x{:02x}",
                header.opcode(),
                opcode.code()
            )));
        }
        if header.token() != token {
            return Err(LightifyError::Protocol(format!(
                "Answer token {} does not match request {}",
                header.token(),
                token
            )));
        }
        Ok(header)
    }

    async fn read_body(&mut self, length: usize) -> LightifyResult<Vec<u8>> {
        let mut buf = vec![0u8; length];
        self.transport.read_exact(&mut buf).await?;
        Ok(buf)
    }

    /// Common exchange of the four set commands: send, check the header,
    /// read the 12-byte answer, verify the echoed address.
    ///
    /// # Returns
    ///
    /// The raw status byte, left to the caller to map after it knows the
    /// exchange itself was sound.
    async fn exchange_set(
        &mut self,
        opcode: Opcode,
        telegram: &[u8],
        token: u32,
        expected_address: u64,
    ) -> LightifyResult<u8> {
        self.send(telegram).await?;
        self.read_answer_header(opcode, token).await?;
        let body = self.read_body(SET_ANSWER_LENGTH).await?;
        let answer = SetAnswer::decode(&body)?;
        answer.verify_address(expected_address)?;
        Ok(answer.status())
    }
}
