//! Register definitions for the ADXRS450
//!
//! All registers are 16 bits wide and read through the framed command
//! protocol in [`crate::interface`]. This driver never writes them.

device_driver::create_device!(
    device_name: Adxrs450Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// RATE - Rate output (0x00), two's complement
        register Rate {
            const ADDRESS = 0x00;
            const SIZE_BITS = 16;

            /// Raw rate, 80 LSB/(°/s)
            rate: uint = 0..16,
        },

        /// TEM - Temperature (0x02)
        register Tem {
            const ADDRESS = 0x02;
            const SIZE_BITS = 16;

            reserved_5_0: uint = 0..6,
            /// Raw 10-bit temperature
            temperature: uint = 6..16,
        },

        /// LOCST - Low continuous self-test (0x04)
        register LoCst {
            const ADDRESS = 0x04;
            const SIZE_BITS = 16;

            /// Self-test value
            value: uint = 0..16,
        },

        /// HICST - High continuous self-test (0x06)
        register HiCst {
            const ADDRESS = 0x06;
            const SIZE_BITS = 16;

            /// Self-test value
            value: uint = 0..16,
        },

        /// QUAD - Quadrature (0x08)
        register Quad {
            const ADDRESS = 0x08;
            const SIZE_BITS = 16;

            /// Quadrature value
            value: uint = 0..16,
        },

        /// FAULT - Fault flags (0x0A)
        register Fault {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 16;

            /// Raw fault flags
            flags: uint = 0..16,
        },

        /// PID - Part identification (0x0C)
        /// Expected high byte: 0x52
        register Pid {
            const ADDRESS = 0x0C;
            const SIZE_BITS = 16;

            /// Silicon revision
            revision: uint = 0..8,
            /// Part ID (should read 0x52)
            part_id: uint = 8..16,
        },

        /// SN_HIGH - Serial number, upper half (0x0E)
        register SnHigh {
            const ADDRESS = 0x0E;
            const SIZE_BITS = 16;

            /// Serial number bits 31..16
            value: uint = 0..16,
        },

        /// SN_LOW - Serial number, lower half (0x10)
        register SnLow {
            const ADDRESS = 0x10;
            const SIZE_BITS = 16;

            /// Serial number bits 15..0
            value: uint = 0..16,
        }
    }
);
