mod dashboard;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var("OLIVE_MILL_DB") {
            return Self::open(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "olive-mill")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("olive-mill.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("database lock poisoned")
    }

    // ============================================================
    // Client operations
    // ============================================================

    pub fn list_clients(
        &self,
        search: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<ClientPage> {
        let conn = self.lock();
        let offset = (page - 1).max(0) * limit;
        let pattern = search.map(|s| format!("%{}%", s));

        let (total, clients) = match &pattern {
            Some(p) => {
                let total: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM clients
                     WHERE firstname LIKE ?1 OR lastname LIKE ?1 OR phone LIKE ?1",
                    [p],
                    |row| row.get(0),
                )?;
                let mut stmt = conn.prepare(
                    "SELECT id, firstname, lastname, phone, address, created_at, updated_at
                     FROM clients
                     WHERE firstname LIKE ?1 OR lastname LIKE ?1 OR phone LIKE ?1
                     ORDER BY created_at DESC LIMIT ?2 OFFSET ?3",
                )?;
                let clients = stmt
                    .query_map((p, limit, offset), client_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                (total, clients)
            }
            None => {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
                let mut stmt = conn.prepare(
                    "SELECT id, firstname, lastname, phone, address, created_at, updated_at
                     FROM clients ORDER BY created_at DESC LIMIT ? OFFSET ?",
                )?;
                let clients = stmt
                    .query_map((limit, offset), client_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                (total, clients)
            }
        };

        Ok(ClientPage {
            clients,
            pagination: Pagination::new(total, page, limit),
        })
    }

    pub fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, firstname, lastname, phone, address, created_at, updated_at
             FROM clients WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(client_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn create_client(&self, input: CreateClientInput) -> Result<Client> {
        let conn = self.lock();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO clients (firstname, lastname, phone, address, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                &input.firstname,
                &input.lastname,
                &input.phone,
                &input.address,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();

        Ok(Client {
            id,
            firstname: input.firstname,
            lastname: input.lastname,
            phone: input.phone,
            address: input.address,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_client(&self, id: i64, input: UpdateClientInput) -> Result<Option<Client>> {
        let Some(existing) = self.get_client(id)? else {
            return Ok(None);
        };

        let conn = self.lock();
        let now = Utc::now();
        let firstname = input.firstname.unwrap_or(existing.firstname);
        let lastname = input.lastname.unwrap_or(existing.lastname);
        let phone = input.phone.unwrap_or(existing.phone);
        let address = input.address.or(existing.address);

        conn.execute(
            "UPDATE clients SET firstname = ?, lastname = ?, phone = ?, address = ?, updated_at = ?
             WHERE id = ?",
            (&firstname, &lastname, &phone, &address, now.to_rfc3339(), id),
        )?;

        Ok(Some(Client {
            id,
            firstname,
            lastname,
            phone,
            address,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_client(&self, id: i64) -> Result<bool> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM clients WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Batch (weigh ticket) operations
    // ============================================================

    pub fn list_batches(
        &self,
        status: Option<BatchStatus>,
        client_id: Option<i64>,
        page: i64,
        limit: i64,
    ) -> Result<BatchPage> {
        let conn = self.lock();
        let offset = (page - 1).max(0) * limit;

        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(status) = status {
            where_clauses.push("b.status = ?");
            params.push(Box::new(status.as_str().to_string()));
        }
        if let Some(client_id) = client_id {
            where_clauses.push("b.client_id = ?");
            params.push(Box::new(client_id));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM batches b {}", where_sql);
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let total: i64 = conn.query_row(&count_sql, params_ref.as_slice(), |row| row.get(0))?;

        let list_sql = format!(
            "SELECT {}, {} FROM batches b
             LEFT JOIN clients c ON c.id = b.client_id
             {} ORDER BY b.date_received DESC LIMIT ? OFFSET ?",
            BATCH_COLUMNS, CLIENT_JOIN_COLUMNS, where_sql
        );
        params.push(Box::new(limit));
        params.push(Box::new(offset));
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&list_sql)?;
        let batches = stmt
            .query_map(params_ref.as_slice(), batch_with_client_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchPage {
            batches,
            pagination: Pagination::new(total, page, limit),
        })
    }

    pub fn get_batch(&self, id: i64) -> Result<Option<BatchWithClient>> {
        let conn = self.lock();
        let sql = format!(
            "SELECT {}, {} FROM batches b
             LEFT JOIN clients c ON c.id = b.client_id
             WHERE b.id = ?",
            BATCH_COLUMNS, CLIENT_JOIN_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(batch_with_client_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn create_batch(&self, input: CreateBatchInput) -> Result<BatchWithClient> {
        self.get_client(input.client_id)?
            .ok_or_else(|| anyhow::anyhow!("Client not found"))?;

        let id = {
            let conn = self.lock();
            let now = Utc::now();
            conn.execute(
                "INSERT INTO batches (client_id, date_received, weight_in, weight_out,
                                      net_weight, number_of_boxes, status, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, 'received', ?, ?)",
                (
                    input.client_id,
                    now.to_rfc3339(),
                    input.weight_in,
                    input.weight_out,
                    input.net_weight,
                    input.number_of_boxes,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ),
            )?;
            conn.last_insert_rowid()
        };

        self.get_batch(id)?
            .ok_or_else(|| anyhow::anyhow!("Batch vanished after insert"))
    }

    pub fn update_batch(
        &self,
        id: i64,
        input: UpdateBatchInput,
    ) -> Result<Option<BatchWithClient>> {
        let Some(existing) = self.get_batch(id)? else {
            return Ok(None);
        };
        let existing = existing.batch;

        {
            let conn = self.lock();
            let now = Utc::now();
            let weight_in = input.weight_in.or(existing.weight_in);
            let weight_out = input.weight_out.or(existing.weight_out);
            let net_weight = input.net_weight.unwrap_or(existing.net_weight);
            let number_of_boxes = input.number_of_boxes.unwrap_or(existing.number_of_boxes);
            let unit_price = input.unit_price.or(existing.unit_price);
            let total_amount = input.total_amount.or(existing.total_amount);
            let status = input.status.unwrap_or(existing.status);
            let is_paid = input.is_paid.unwrap_or(existing.is_paid);
            let payment_method = input.payment_method.or(existing.payment_method);
            let payment_reference = input.payment_reference.or(existing.payment_reference);
            let date_paid = input.date_paid.or(existing.date_paid);

            conn.execute(
                "UPDATE batches SET weight_in = ?, weight_out = ?, net_weight = ?,
                     number_of_boxes = ?, unit_price = ?, total_amount = ?, status = ?,
                     is_paid = ?, payment_method = ?, payment_reference = ?, date_paid = ?,
                     updated_at = ?
                 WHERE id = ?",
                rusqlite::params![
                    weight_in,
                    weight_out,
                    net_weight,
                    number_of_boxes,
                    unit_price,
                    total_amount,
                    status.as_str(),
                    is_paid as i64,
                    payment_method.map(|m| m.as_str().to_string()),
                    payment_reference,
                    date_paid.map(|d| d.to_string()),
                    now.to_rfc3339(),
                    id,
                ],
            )?;
        }

        self.get_batch(id)
    }

    pub fn update_batch_status(&self, id: i64, status: BatchStatus) -> Result<Option<Batch>> {
        let Some(existing) = self.get_batch(id)? else {
            return Ok(None);
        };

        {
            let conn = self.lock();
            let now = Utc::now();
            conn.execute(
                "UPDATE batches SET status = ?, updated_at = ? WHERE id = ?",
                (status.as_str(), now.to_rfc3339(), id),
            )?;
        }

        Ok(Some(Batch {
            status,
            ..existing.batch
        }))
    }

    pub fn delete_batch(&self, id: i64) -> Result<bool> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM batches WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Processing decision operations
    // ============================================================

    pub fn list_decisions(
        &self,
        batch_id: Option<i64>,
        decision_type: Option<DecisionType>,
    ) -> Result<Vec<ProcessingDecision>> {
        let conn = self.lock();
        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(batch_id) = batch_id {
            where_clauses.push("batch_id = ?");
            params.push(Box::new(batch_id));
        }
        if let Some(dt) = decision_type {
            where_clauses.push("decision_type = ?");
            params.push(Box::new(dt.as_str().to_string()));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT id, batch_id, decision_type, date, unit_price, price_id, created_at
             FROM processing_decisions {} ORDER BY date DESC",
            where_sql
        );
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let decisions = stmt
            .query_map(params_ref.as_slice(), decision_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(decisions)
    }

    /// Records the decision, then flips the batch to `in_process`. The two
    /// writes are independent; there is no compensating rollback if the
    /// second fails.
    pub fn create_decision(&self, input: CreateDecisionInput) -> Result<ProcessingDecision> {
        let batch = self
            .get_batch(input.batch_id)?
            .ok_or_else(|| anyhow::anyhow!("Batch not found"))?;

        if batch.batch.status == BatchStatus::Completed {
            anyhow::bail!("Batch already processed");
        }

        let conn = self.lock();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO processing_decisions (batch_id, decision_type, date, unit_price, price_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                input.batch_id,
                input.decision_type.as_str(),
                now.to_rfc3339(),
                input.unit_price,
                input.price_id,
                now.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();

        conn.execute(
            "UPDATE batches SET status = 'in_process', updated_at = ? WHERE id = ?",
            (now.to_rfc3339(), input.batch_id),
        )?;

        Ok(ProcessingDecision {
            id,
            batch_id: input.batch_id,
            decision_type: input.decision_type,
            date: now,
            unit_price: input.unit_price,
            price_id: input.price_id,
            created_at: now,
        })
    }

    pub fn get_decision(&self, id: i64) -> Result<Option<ProcessingDecision>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, batch_id, decision_type, date, unit_price, price_id, created_at
             FROM processing_decisions WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(decision_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // Pressing room operations
    // ============================================================

    pub fn list_rooms(&self) -> Result<Vec<RoomWithStatus>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT r.id, r.name, r.capacity, r.created_at, r.updated_at,
                    EXISTS(SELECT 1 FROM pressing_sessions s
                           WHERE s.pressing_room_id = r.id AND s.finish IS NULL)
             FROM pressing_rooms r ORDER BY r.created_at ASC",
        )?;
        let rooms = stmt
            .query_map([], |row| {
                Ok(RoomWithStatus {
                    room: room_from_row(row)?,
                    status: if row.get::<_, i64>(5)? != 0 {
                        RoomStatus::Active
                    } else {
                        RoomStatus::Inactive
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rooms)
    }

    pub fn get_room(&self, id: i64) -> Result<Option<RoomWithStatus>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT r.id, r.name, r.capacity, r.created_at, r.updated_at,
                    EXISTS(SELECT 1 FROM pressing_sessions s
                           WHERE s.pressing_room_id = r.id AND s.finish IS NULL)
             FROM pressing_rooms r WHERE r.id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(RoomWithStatus {
                room: room_from_row(row)?,
                status: if row.get::<_, i64>(5)? != 0 {
                    RoomStatus::Active
                } else {
                    RoomStatus::Inactive
                },
            })),
            None => Ok(None),
        }
    }

    pub fn create_room(&self, input: CreateRoomInput) -> Result<PressingRoom> {
        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO pressing_rooms (name, capacity, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
            (&input.name, input.capacity, now.to_rfc3339(), now.to_rfc3339()),
        )?;
        Ok(PressingRoom {
            id: conn.last_insert_rowid(),
            name: input.name,
            capacity: input.capacity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_room(&self, id: i64, input: UpdateRoomInput) -> Result<Option<PressingRoom>> {
        let Some(existing) = self.get_room(id)? else {
            return Ok(None);
        };
        let existing = existing.room;

        let conn = self.lock();
        let now = Utc::now();
        let name = input.name.unwrap_or(existing.name);
        let capacity = input.capacity.or(existing.capacity);

        conn.execute(
            "UPDATE pressing_rooms SET name = ?, capacity = ?, updated_at = ? WHERE id = ?",
            (&name, capacity, now.to_rfc3339(), id),
        )?;

        Ok(Some(PressingRoom {
            id,
            name,
            capacity,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    // ============================================================
    // Pressing session operations
    // ============================================================

    pub fn list_sessions(
        &self,
        active_only: bool,
        room_id: Option<i64>,
    ) -> Result<Vec<SessionWithRoom>> {
        let conn = self.lock();
        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if active_only {
            where_clauses.push("s.finish IS NULL");
        }
        if let Some(room_id) = room_id {
            where_clauses.push("s.pressing_room_id = ?");
            params.push(Box::new(room_id));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {}, {} FROM pressing_sessions s
             LEFT JOIN pressing_rooms r ON r.id = s.pressing_room_id
             {} ORDER BY s.start DESC",
            SESSION_COLUMNS, ROOM_JOIN_COLUMNS, where_sql
        );
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params_ref.as_slice(), session_with_room_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    pub fn start_session(&self, input: StartSessionInput) -> Result<SessionWithRoom> {
        self.get_room(input.pressing_room_id)?
            .ok_or_else(|| anyhow::anyhow!("Pressing room not found"))?;

        let id = {
            let conn = self.lock();

            let busy: i64 = conn.query_row(
                "SELECT COUNT(*) FROM pressing_sessions
                 WHERE pressing_room_id = ? AND finish IS NULL",
                [input.pressing_room_id],
                |row| row.get(0),
            )?;
            if busy > 0 {
                anyhow::bail!("Pressing room is already in use");
            }

            let now = Utc::now();
            conn.execute(
                "INSERT INTO pressing_sessions (pressing_room_id, start, number_of_boxes, created_at)
                 VALUES (?, ?, ?, ?)",
                (
                    input.pressing_room_id,
                    now.to_rfc3339(),
                    input.number_of_boxes,
                    now.to_rfc3339(),
                ),
            )?;
            conn.last_insert_rowid()
        };

        self.get_session(id)?
            .ok_or_else(|| anyhow::anyhow!("Session vanished after insert"))
    }

    pub fn finish_session(&self, id: i64) -> Result<Option<PressingSession>> {
        let Some(existing) = self.get_session(id)? else {
            return Ok(None);
        };
        let existing = existing.session;

        if existing.finish.is_some() {
            anyhow::bail!("Session already finished");
        }

        let now = Utc::now();
        {
            let conn = self.lock();
            conn.execute(
                "UPDATE pressing_sessions SET finish = ? WHERE id = ?",
                (now.to_rfc3339(), id),
            )?;
        }

        Ok(Some(PressingSession {
            finish: Some(now),
            ..existing
        }))
    }

    pub fn get_session(&self, id: i64) -> Result<Option<SessionWithRoom>> {
        let conn = self.lock();
        let sql = format!(
            "SELECT {}, {} FROM pressing_sessions s
             LEFT JOIN pressing_rooms r ON r.id = s.pressing_room_id
             WHERE s.id = ?",
            SESSION_COLUMNS, ROOM_JOIN_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(session_with_room_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // Oil batch operations
    // ============================================================

    pub fn list_oil_batches(
        &self,
        batch_id: Option<i64>,
        pressing_session_id: Option<i64>,
        tested: Option<bool>,
    ) -> Result<Vec<OilBatchWithTests>> {
        let oil_batches = {
            let conn = self.lock();
            let mut where_clauses = Vec::new();
            let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
            if let Some(batch_id) = batch_id {
                where_clauses.push("batch_id = ?");
                params.push(Box::new(batch_id));
            }
            if let Some(session_id) = pressing_session_id {
                where_clauses.push("pressing_session_id = ?");
                params.push(Box::new(session_id));
            }
            let where_sql = if where_clauses.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", where_clauses.join(" AND "))
            };

            let sql = format!(
                "SELECT id, weight, residue, batch_id, pressing_session_id, created_at
                 FROM oil_batches {} ORDER BY created_at DESC",
                where_sql
            );
            let params_ref: Vec<&dyn rusqlite::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_ref.as_slice(), oil_batch_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let mut result = Vec::with_capacity(oil_batches.len());
        for oil_batch in oil_batches {
            let quality_tests = self.list_quality_tests(Some(oil_batch.id), None, None)?;
            result.push(OilBatchWithTests {
                oil_batch,
                quality_tests,
            });
        }

        // `tested` filters on whether any quality test exists
        if let Some(tested) = tested {
            result.retain(|b| b.quality_tests.is_empty() != tested);
        }

        Ok(result)
    }

    pub fn create_oil_batch(&self, input: CreateOilBatchInput) -> Result<OilBatch> {
        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO oil_batches (weight, residue, batch_id, pressing_session_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                input.weight,
                input.residue,
                input.batch_id,
                input.pressing_session_id,
                now.to_rfc3339(),
            ),
        )?;
        Ok(OilBatch {
            id: conn.last_insert_rowid(),
            weight: input.weight,
            residue: input.residue,
            batch_id: input.batch_id,
            pressing_session_id: input.pressing_session_id,
            created_at: now,
        })
    }

    pub fn get_oil_batch(&self, id: i64) -> Result<Option<OilBatchWithTests>> {
        let oil_batch = {
            let conn = self.lock();
            let mut stmt = conn.prepare(
                "SELECT id, weight, residue, batch_id, pressing_session_id, created_at
                 FROM oil_batches WHERE id = ?",
            )?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => oil_batch_from_row(row)?,
                None => return Ok(None),
            }
        };

        let quality_tests = self.list_quality_tests(Some(id), None, None)?;
        Ok(Some(OilBatchWithTests {
            oil_batch,
            quality_tests,
        }))
    }

    /// Full provenance chain: delivery, client, decisions, session, room and
    /// quality tests for one oil batch.
    pub fn get_oil_batch_traceability(&self, id: i64) -> Result<Option<OilBatchTraceability>> {
        let Some(with_tests) = self.get_oil_batch(id)? else {
            return Ok(None);
        };
        let oil_batch = with_tests.oil_batch;

        let (batch, client, processing_decisions) = match oil_batch.batch_id {
            Some(batch_id) => {
                let with_client = self.get_batch(batch_id)?;
                let decisions = self.list_decisions(Some(batch_id), None)?;
                match with_client {
                    Some(b) => (Some(b.batch), b.client, decisions),
                    None => (None, None, decisions),
                }
            }
            None => (None, None, Vec::new()),
        };

        let (pressing_session, pressing_room) = match oil_batch.pressing_session_id {
            Some(session_id) => match self.get_session(session_id)? {
                Some(s) => (Some(s.session), s.pressing_room),
                None => (None, None),
            },
            None => (None, None),
        };

        Ok(Some(OilBatchTraceability {
            oil_batch,
            batch,
            client,
            processing_decisions,
            pressing_session,
            pressing_room,
            quality_tests: with_tests.quality_tests,
        }))
    }

    // ============================================================
    // Quality test operations
    // ============================================================

    pub fn list_quality_tests(
        &self,
        oil_batch_id: Option<i64>,
        grade: Option<OilGrade>,
        tested_by_employee_id: Option<i64>,
    ) -> Result<Vec<QualityTest>> {
        let conn = self.lock();
        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(oil_batch_id) = oil_batch_id {
            where_clauses.push("oil_batch_id = ?");
            params.push(Box::new(oil_batch_id));
        }
        if let Some(grade) = grade {
            where_clauses.push("grade = ?");
            params.push(Box::new(grade.as_str().to_string()));
        }
        if let Some(employee_id) = tested_by_employee_id {
            where_clauses.push("tested_by_employee_id = ?");
            params.push(Box::new(employee_id));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT id, oil_batch_id, acidity_level, grade, test_date, tested_by_employee_id, created_at
             FROM quality_tests {} ORDER BY test_date DESC",
            where_sql
        );
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let tests = stmt
            .query_map(params_ref.as_slice(), quality_test_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tests)
    }

    pub fn create_quality_test(&self, input: CreateQualityTestInput) -> Result<QualityTest> {
        self.get_oil_batch(input.oil_batch_id)?
            .ok_or_else(|| anyhow::anyhow!("Oil batch not found"))?;

        let conn = self.lock();
        let now = Utc::now();
        let test_date = now.date_naive();

        conn.execute(
            "INSERT INTO quality_tests (oil_batch_id, acidity_level, grade, test_date, tested_by_employee_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                input.oil_batch_id,
                input.acidity_level,
                input.grade.as_str(),
                test_date.to_string(),
                input.tested_by_employee_id,
                now.to_rfc3339(),
            ),
        )?;

        Ok(QualityTest {
            id: conn.last_insert_rowid(),
            oil_batch_id: input.oil_batch_id,
            acidity_level: input.acidity_level,
            grade: input.grade,
            test_date,
            tested_by_employee_id: input.tested_by_employee_id,
            created_at: now,
        })
    }

    pub fn get_quality_test(&self, id: i64) -> Result<Option<QualityTest>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, oil_batch_id, acidity_level, grade, test_date, tested_by_employee_id, created_at
             FROM quality_tests WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(quality_test_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // Container operations
    // ============================================================

    pub fn list_containers(&self) -> Result<Vec<ContainerView>> {
        let conn = self.lock();
        // Latest ledger entry per container collapsed into a current weight
        let mut stmt = conn.prepare(
            "SELECT c.id, c.label, c.capacity, c.updated_at,
                    (SELECT total_weight FROM container_contents cc
                     WHERE cc.container_id = c.id ORDER BY cc.recorded_at DESC, cc.id DESC LIMIT 1),
                    (SELECT recorded_at FROM container_contents cc
                     WHERE cc.container_id = c.id ORDER BY cc.recorded_at DESC, cc.id DESC LIMIT 1)
             FROM containers c ORDER BY c.created_at ASC",
        )?;
        let views = stmt
            .query_map([], container_view_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    pub fn create_container(&self, input: CreateContainerInput) -> Result<ContainerView> {
        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO containers (label, capacity, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
            (&input.label, input.capacity, now.to_rfc3339(), now.to_rfc3339()),
        )?;
        Ok(ContainerView {
            id: conn.last_insert_rowid(),
            label: input.label,
            capacity: input.capacity,
            current_weight: 0,
            last_updated: now,
        })
    }

    /// The full content ledger for a container, newest entry first.
    pub fn list_container_contents(&self, id: i64) -> Result<Option<Vec<ContainerContent>>> {
        let conn = self.lock();
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM containers WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(None);
        }
        let mut stmt = conn.prepare(
            "SELECT id, container_id, total_weight, recorded_at, value, currency
             FROM container_contents WHERE container_id = ?
             ORDER BY recorded_at DESC, id DESC",
        )?;
        let entries = stmt
            .query_map([id], container_content_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(entries))
    }

    /// Appends a ledger entry for an add/sell movement and returns the
    /// refreshed view. Sells clamp the resulting weight at zero.
    pub fn container_transaction(
        &self,
        id: i64,
        input: ContainerTransactionInput,
    ) -> Result<Option<ContainerView>> {
        let conn = self.lock();

        let container: Option<(String, i64)> = {
            let mut stmt = conn.prepare("SELECT label, capacity FROM containers WHERE id = ?")?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => Some((row.get(0)?, row.get(1)?)),
                None => None,
            }
        };
        let Some((label, capacity)) = container else {
            return Ok(None);
        };

        let current_weight: i64 = conn
            .query_row(
                "SELECT total_weight FROM container_contents
                 WHERE container_id = ? ORDER BY recorded_at DESC, id DESC LIMIT 1",
                [id],
                |row| row.get(0),
            )
            .unwrap_or(0);

        let next_weight = match input.transaction_type {
            ContainerTransactionType::Add => current_weight + input.weight,
            ContainerTransactionType::Sell => (current_weight - input.weight).max(0),
        };
        let value = input.price_per_kg.map(|p| p * input.weight);

        let now = Utc::now();
        conn.execute(
            "INSERT INTO container_contents (container_id, total_weight, recorded_at, value, currency)
             VALUES (?, ?, ?, ?, ?)",
            (
                id,
                next_weight,
                now.to_rfc3339(),
                value,
                value.map(|_| "SAR"),
            ),
        )?;

        Ok(Some(ContainerView {
            id,
            label,
            capacity,
            current_weight: next_weight,
            last_updated: now,
        }))
    }

    // ============================================================
    // Price operations
    // ============================================================

    pub fn list_prices(&self) -> Result<Vec<Price>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, date, milling_price_per_kg, oil_client_selling_price_per_kg,
                    oil_export_selling_price_per_kg, olive_buying_price_per_kg,
                    created_at, updated_at
             FROM prices ORDER BY date DESC",
        )?;
        let prices = stmt
            .query_map([], price_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(prices)
    }

    pub fn latest_price(&self) -> Result<Option<Price>> {
        Ok(self.list_prices()?.into_iter().next())
    }

    pub fn create_price(&self, input: CreatePriceInput) -> Result<Price> {
        if self.get_price_by_date(input.date)?.is_some() {
            anyhow::bail!("Price already exists for this date");
        }

        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO prices (date, milling_price_per_kg, oil_client_selling_price_per_kg,
                                 oil_export_selling_price_per_kg, olive_buying_price_per_kg,
                                 created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                input.date.to_string(),
                input.milling_price_per_kg,
                input.oil_client_selling_price_per_kg,
                input.oil_export_selling_price_per_kg,
                input.olive_buying_price_per_kg,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        Ok(Price {
            id: conn.last_insert_rowid(),
            date: input.date,
            milling_price_per_kg: input.milling_price_per_kg,
            oil_client_selling_price_per_kg: input.oil_client_selling_price_per_kg,
            oil_export_selling_price_per_kg: input.oil_export_selling_price_per_kg,
            olive_buying_price_per_kg: input.olive_buying_price_per_kg,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_price_by_date(&self, date: NaiveDate) -> Result<Option<Price>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, date, milling_price_per_kg, oil_client_selling_price_per_kg,
                    oil_export_selling_price_per_kg, olive_buying_price_per_kg,
                    created_at, updated_at
             FROM prices WHERE date = ?",
        )?;
        let mut rows = stmt.query([date.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(price_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // Invoice operations
    // ============================================================

    pub fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        client_id: Option<i64>,
        page: i64,
        limit: i64,
    ) -> Result<InvoicePage> {
        let conn = self.lock();
        let offset = (page - 1).max(0) * limit;

        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(status) = status {
            where_clauses.push("status = ?");
            params.push(Box::new(status.as_str().to_string()));
        }
        if let Some(client_id) = client_id {
            where_clauses.push("client_id = ?");
            params.push(Box::new(client_id));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM invoices {}", where_sql);
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let total: i64 = conn.query_row(&count_sql, params_ref.as_slice(), |row| row.get(0))?;

        let sql = format!(
            "SELECT id, client_id, batch_id, processing_decision_id, amount, status,
                    issue_date, due_date, notes, created_at, updated_at
             FROM invoices {} ORDER BY issue_date DESC LIMIT ? OFFSET ?",
            where_sql
        );
        params.push(Box::new(limit));
        params.push(Box::new(offset));
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let invoices = stmt
            .query_map(params_ref.as_slice(), invoice_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InvoicePage {
            invoices,
            pagination: Pagination::new(total, page, limit),
        })
    }

    pub fn create_invoice(&self, input: CreateInvoiceInput) -> Result<Invoice> {
        self.get_client(input.client_id)?
            .ok_or_else(|| anyhow::anyhow!("Client not found"))?;

        let conn = self.lock();
        let now = Utc::now();
        let issue_date = now.date_naive();

        conn.execute(
            "INSERT INTO invoices (client_id, batch_id, processing_decision_id, amount, status,
                                   issue_date, due_date, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, 'draft', ?, ?, ?, ?, ?)",
            (
                input.client_id,
                input.batch_id,
                input.processing_decision_id,
                input.amount,
                issue_date.to_string(),
                input.due_date.to_string(),
                &input.notes,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Invoice {
            id: conn.last_insert_rowid(),
            client_id: input.client_id,
            batch_id: input.batch_id,
            processing_decision_id: input.processing_decision_id,
            amount: input.amount,
            status: InvoiceStatus::Draft,
            issue_date,
            due_date: input.due_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_invoice_status(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>> {
        let Some(existing) = self.get_invoice(id)? else {
            return Ok(None);
        };

        {
            let conn = self.lock();
            let now = Utc::now();
            conn.execute(
                "UPDATE invoices SET status = ?, updated_at = ? WHERE id = ?",
                (status.as_str(), now.to_rfc3339(), id),
            )?;
        }

        Ok(Some(Invoice { status, ..existing }))
    }

    pub fn get_invoice(&self, id: i64) -> Result<Option<Invoice>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, client_id, batch_id, processing_decision_id, amount, status,
                    issue_date, due_date, notes, created_at, updated_at
             FROM invoices WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(invoice_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // Payment operations
    // ============================================================

    pub fn list_payments(&self, invoice_id: Option<i64>) -> Result<Vec<Payment>> {
        let conn = self.lock();
        let sql = match invoice_id {
            Some(_) => {
                "SELECT id, invoice_id, amount, payment_date, payment_method, reference, created_at
                 FROM payments WHERE invoice_id = ? ORDER BY payment_date DESC"
            }
            None => {
                "SELECT id, invoice_id, amount, payment_date, payment_method, reference, created_at
                 FROM payments ORDER BY payment_date DESC"
            }
        };
        let mut stmt = conn.prepare(sql)?;
        let payments = match invoice_id {
            Some(id) => stmt
                .query_map([id], payment_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], payment_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(payments)
    }

    /// Records a payment and marks the invoice `paid` once the payment sum
    /// reaches the invoice amount. Returns `None` if the invoice is missing.
    pub fn record_payment(&self, input: CreatePaymentInput) -> Result<Option<Payment>> {
        let Some(invoice) = self.get_invoice(input.invoice_id)? else {
            return Ok(None);
        };

        let conn = self.lock();
        let now = Utc::now();
        let payment_date = now.date_naive();

        conn.execute(
            "INSERT INTO payments (invoice_id, amount, payment_date, payment_method, reference, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                input.invoice_id,
                input.amount,
                payment_date.to_string(),
                input.payment_method.map(|m| m.as_str().to_string()),
                &input.reference,
                now.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();

        let total_paid: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = ?",
            [input.invoice_id],
            |row| row.get(0),
        )?;
        if total_paid >= invoice.amount {
            conn.execute(
                "UPDATE invoices SET status = 'paid', updated_at = ? WHERE id = ?",
                (now.to_rfc3339(), input.invoice_id),
            )?;
        }

        Ok(Some(Payment {
            id,
            invoice_id: input.invoice_id,
            amount: input.amount,
            payment_date,
            payment_method: input.payment_method,
            reference: input.reference,
            created_at: now,
        }))
    }

    // ============================================================
    // Employee operations
    // ============================================================

    pub fn list_employees(
        &self,
        role: Option<EmployeeRole>,
        active: Option<bool>,
    ) -> Result<Vec<Employee>> {
        let conn = self.lock();
        let mut where_clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(role) = role {
            where_clauses.push("role = ?");
            params.push(Box::new(role.as_str().to_string()));
        }
        if let Some(active) = active {
            where_clauses.push("active = ?");
            params.push(Box::new(active as i64));
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT id, firstname, lastname, role, hire_date, phone, active, created_at, updated_at
             FROM employees {} ORDER BY lastname ASC, firstname ASC",
            where_sql
        );
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let employees = stmt
            .query_map(params_ref.as_slice(), employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    pub fn create_employee(&self, input: CreateEmployeeInput) -> Result<Employee> {
        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO employees (firstname, lastname, role, hire_date, phone, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
            (
                &input.firstname,
                &input.lastname,
                input.role.as_str(),
                input.hire_date.to_string(),
                &input.phone,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        Ok(Employee {
            id: conn.last_insert_rowid(),
            firstname: input.firstname,
            lastname: input.lastname,
            role: input.role,
            hire_date: input.hire_date,
            phone: input.phone,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_employee(
        &self,
        id: i64,
        input: UpdateEmployeeInput,
    ) -> Result<Option<Employee>> {
        let Some(existing) = self.get_employee(id)? else {
            return Ok(None);
        };

        let conn = self.lock();
        let now = Utc::now();
        let firstname = input.firstname.unwrap_or(existing.firstname);
        let lastname = input.lastname.unwrap_or(existing.lastname);
        let role = input.role.unwrap_or(existing.role);
        let hire_date = input.hire_date.unwrap_or(existing.hire_date);
        let phone = input.phone.or(existing.phone);
        let active = input.active.unwrap_or(existing.active);

        conn.execute(
            "UPDATE employees SET firstname = ?, lastname = ?, role = ?, hire_date = ?,
                 phone = ?, active = ?, updated_at = ?
             WHERE id = ?",
            (
                &firstname,
                &lastname,
                role.as_str(),
                hire_date.to_string(),
                &phone,
                active as i64,
                now.to_rfc3339(),
                id,
            ),
        )?;

        Ok(Some(Employee {
            id,
            firstname,
            lastname,
            role,
            hire_date,
            phone,
            active,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, firstname, lastname, role, hire_date, phone, active, created_at, updated_at
             FROM employees WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(employee_from_row(row)?)),
            None => Ok(None),
        }
    }

    // ============================================================
    // User operations
    // ============================================================

    pub fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
        firstname: Option<String>,
        lastname: Option<String>,
    ) -> Result<User> {
        let conn = self.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO users (email, password_hash, role, firstname, lastname, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                email,
                password_hash,
                role.as_str(),
                &firstname,
                &lastname,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            firstname,
            lastname,
            created_at: now,
            updated_at: now,
        })
    }

    /// Looks a user up by email. Legacy rows may still carry Arabic role
    /// strings; those are normalized to canonical English and the fix is
    /// persisted, matching the original login behavior.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, email, password_hash, role, firstname, lastname, created_at, updated_at
             FROM users WHERE email = ?",
        )?;
        let mut rows = stmt.query([email])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let stored_role: String = row.get(3)?;
        let mut user = user_from_row_parts(row, &stored_role)?;

        if UserRole::from_str(&stored_role).is_none() {
            if let Some(fixed) = UserRole::normalize(&stored_role) {
                conn.execute(
                    "UPDATE users SET role = ?, updated_at = ? WHERE id = ?",
                    (fixed.as_str(), Utc::now().to_rfc3339(), user.id),
                )?;
                user.role = fixed;
            }
        }

        Ok(Some(user))
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, email, password_hash, role, firstname, lastname, created_at, updated_at
             FROM users WHERE id = ?",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => {
                let stored_role: String = row.get(3)?;
                Ok(Some(user_from_row_parts(row, &stored_role)?))
            }
            None => Ok(None),
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

// ============================================================
// Row mapping
// ============================================================

const BATCH_COLUMNS: &str = "b.id, b.client_id, b.date_received, b.weight_in, b.weight_out,
    b.net_weight, b.number_of_boxes, b.status, b.unit_price, b.total_amount, b.is_paid,
    b.payment_method, b.payment_reference, b.date_paid, b.created_at, b.updated_at";

const CLIENT_JOIN_COLUMNS: &str =
    "c.id, c.firstname, c.lastname, c.phone, c.address, c.created_at, c.updated_at";

const SESSION_COLUMNS: &str =
    "s.id, s.pressing_room_id, s.start, s.finish, s.number_of_boxes, s.created_at";

const ROOM_JOIN_COLUMNS: &str = "r.id, r.name, r.capacity, r.created_at, r.updated_at";

fn client_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn batch_with_client_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BatchWithClient> {
    let batch = Batch {
        id: row.get(0)?,
        client_id: row.get(1)?,
        date_received: parse_datetime(row.get::<_, String>(2)?),
        weight_in: row.get(3)?,
        weight_out: row.get(4)?,
        net_weight: row.get(5)?,
        number_of_boxes: row.get(6)?,
        status: BatchStatus::from_str(&row.get::<_, String>(7)?)
            .unwrap_or(BatchStatus::Received),
        unit_price: row.get(8)?,
        total_amount: row.get(9)?,
        is_paid: row.get::<_, i64>(10)? != 0,
        payment_method: row
            .get::<_, Option<String>>(11)?
            .and_then(|s| PaymentMethod::from_str(&s)),
        payment_reference: row.get(12)?,
        date_paid: row.get::<_, Option<String>>(13)?.map(parse_date),
        created_at: parse_datetime(row.get::<_, String>(14)?),
        updated_at: parse_datetime(row.get::<_, String>(15)?),
    };

    // LEFT JOIN: client columns are all-null when the row is gone
    let client = match row.get::<_, Option<i64>>(16)? {
        Some(id) => Some(Client {
            id,
            firstname: row.get(17)?,
            lastname: row.get(18)?,
            phone: row.get(19)?,
            address: row.get(20)?,
            created_at: parse_datetime(row.get::<_, String>(21)?),
            updated_at: parse_datetime(row.get::<_, String>(22)?),
        }),
        None => None,
    };

    Ok(BatchWithClient { batch, client })
}

fn decision_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProcessingDecision> {
    Ok(ProcessingDecision {
        id: row.get(0)?,
        batch_id: row.get(1)?,
        decision_type: DecisionType::from_str(&row.get::<_, String>(2)?)
            .unwrap_or(DecisionType::Milling),
        date: parse_datetime(row.get::<_, String>(3)?),
        unit_price: row.get(4)?,
        price_id: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn room_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PressingRoom> {
    Ok(PressingRoom {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
        updated_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

fn session_with_room_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionWithRoom> {
    let session = PressingSession {
        id: row.get(0)?,
        pressing_room_id: row.get(1)?,
        start: parse_datetime(row.get::<_, String>(2)?),
        finish: row.get::<_, Option<String>>(3)?.map(parse_datetime),
        number_of_boxes: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
    };

    let pressing_room = match row.get::<_, Option<i64>>(6)? {
        Some(id) => Some(PressingRoom {
            id,
            name: row.get(7)?,
            capacity: row.get(8)?,
            created_at: parse_datetime(row.get::<_, String>(9)?),
            updated_at: parse_datetime(row.get::<_, String>(10)?),
        }),
        None => None,
    };

    Ok(SessionWithRoom {
        session,
        pressing_room,
    })
}

fn oil_batch_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OilBatch> {
    Ok(OilBatch {
        id: row.get(0)?,
        weight: row.get(1)?,
        residue: row.get(2)?,
        batch_id: row.get(3)?,
        pressing_session_id: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn quality_test_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<QualityTest> {
    Ok(QualityTest {
        id: row.get(0)?,
        oil_batch_id: row.get(1)?,
        acidity_level: row.get(2)?,
        grade: OilGrade::from_str(&row.get::<_, String>(3)?).unwrap_or(OilGrade::Ordinary),
        test_date: parse_date(row.get::<_, String>(4)?),
        tested_by_employee_id: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn container_content_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContainerContent> {
    Ok(ContainerContent {
        id: row.get(0)?,
        container_id: row.get(1)?,
        total_weight: row.get(2)?,
        recorded_at: parse_datetime(row.get::<_, String>(3)?),
        value: row.get(4)?,
        currency: row.get(5)?,
    })
}

fn container_view_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContainerView> {
    let updated_at = parse_datetime(row.get::<_, String>(3)?);
    let current_weight: Option<i64> = row.get(4)?;
    let recorded_at: Option<String> = row.get(5)?;
    Ok(ContainerView {
        id: row.get(0)?,
        label: row.get(1)?,
        capacity: row.get(2)?,
        current_weight: current_weight.unwrap_or(0),
        last_updated: recorded_at.map(parse_datetime).unwrap_or(updated_at),
    })
}

fn price_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Price> {
    Ok(Price {
        id: row.get(0)?,
        date: parse_date(row.get::<_, String>(1)?),
        milling_price_per_kg: row.get(2)?,
        oil_client_selling_price_per_kg: row.get(3)?,
        oil_export_selling_price_per_kg: row.get(4)?,
        olive_buying_price_per_kg: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn invoice_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Invoice> {
    Ok(Invoice {
        id: row.get(0)?,
        client_id: row.get(1)?,
        batch_id: row.get(2)?,
        processing_decision_id: row.get(3)?,
        amount: row.get(4)?,
        status: InvoiceStatus::from_str(&row.get::<_, String>(5)?)
            .unwrap_or(InvoiceStatus::Draft),
        issue_date: parse_date(row.get::<_, String>(6)?),
        due_date: parse_date(row.get::<_, String>(7)?),
        notes: row.get(8)?,
        created_at: parse_datetime(row.get::<_, String>(9)?),
        updated_at: parse_datetime(row.get::<_, String>(10)?),
    })
}

fn payment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        invoice_id: row.get(1)?,
        amount: row.get(2)?,
        payment_date: parse_date(row.get::<_, String>(3)?),
        payment_method: row
            .get::<_, Option<String>>(4)?
            .and_then(|s| PaymentMethod::from_str(&s)),
        reference: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn employee_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        role: EmployeeRole::from_str(&row.get::<_, String>(3)?).unwrap_or(EmployeeRole::Operator),
        hire_date: parse_date(row.get::<_, String>(4)?),
        phone: row.get(5)?,
        active: row.get::<_, i64>(6)? != 0,
        created_at: parse_datetime(row.get::<_, String>(7)?),
        updated_at: parse_datetime(row.get::<_, String>(8)?),
    })
}

fn user_from_row_parts(row: &rusqlite::Row<'_>, stored_role: &str) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: UserRole::normalize(stored_role).unwrap_or(UserRole::Employee),
        firstname: row.get(4)?,
        lastname: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_date(s: String) -> NaiveDate {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap_or_else(|_| Utc::now().date_naive())
}
