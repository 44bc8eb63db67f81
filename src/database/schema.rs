// ABOUTME: Table definitions for the per-metric time-series store
// ABOUTME: One table per metric family, all keyed by calendar date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

/// Idempotent schema, executed in order on startup
pub(super) const CREATE_TABLES: &[&str] = &[
    // Manual weight log, append-only
    r"
    CREATE TABLE IF NOT EXISTS weight_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        weight_lbs REAL NOT NULL,
        weight_kg REAL NOT NULL,
        weight_grams INTEGER NOT NULL,
        timestamp TEXT NOT NULL,
        synced_to_garmin INTEGER DEFAULT 0
    )
    ",
    // Metric tables, one per metric family, keyed by date
    r"
    CREATE TABLE IF NOT EXISTS sleep (
        date TEXT PRIMARY KEY,
        duration_seconds INTEGER,
        deep_seconds INTEGER,
        light_seconds INTEGER,
        rem_seconds INTEGER,
        awake_seconds INTEGER,
        sleep_score INTEGER,
        avg_spo2 REAL,
        avg_respiration REAL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS resting_hr (
        date TEXT PRIMARY KEY,
        value INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS hrv (
        date TEXT PRIMARY KEY,
        last_night_avg REAL,
        last_night_5min_high REAL,
        weekly_avg REAL,
        status TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS body_battery (
        date TEXT PRIMARY KEY,
        charged INTEGER,
        drained INTEGER,
        highest INTEGER,
        lowest INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS stress (
        date TEXT PRIMARY KEY,
        avg_level INTEGER,
        max_level INTEGER,
        rest_duration INTEGER,
        low_duration INTEGER,
        medium_duration INTEGER,
        high_duration INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS vo2max (
        date TEXT PRIMARY KEY,
        vo2max_value REAL,
        fitness_age INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS weight_history (
        date TEXT PRIMARY KEY,
        weight_grams INTEGER,
        bmi REAL,
        body_fat REAL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS training_load (
        date TEXT PRIMARY KEY,
        acute_load REAL,
        chronic_load REAL,
        load_ratio REAL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS steps (
        date TEXT PRIMARY KEY,
        value INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS active_calories (
        date TEXT PRIMARY KEY,
        value INTEGER
    )
    ",
    // Singleton row tracking the last sync
    r"
    CREATE TABLE IF NOT EXISTS sync_status (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        last_sync_time TEXT,
        last_sync_result TEXT,
        last_sync_days INTEGER
    )
    ",
];
